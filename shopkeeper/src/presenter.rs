use std::io::{self, Write};

use storefront::observer::{Observer, SimulationEvent};

/// Renders simulation events as the store front's announcements on stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutPresenter;

impl Observer for StdoutPresenter {
    fn on_event(&self, event: SimulationEvent) {
        let line = render(&event);

        // A closed stdout must not take the simulation down.
        let _ = writeln!(io::stdout().lock(), "{line}");
    }
}

/// Returns the announcement for `event`.
pub fn render(event: &SimulationEvent) -> String {
    match event {
        SimulationEvent::ProductionStarted { total } => format!("Producing {total} today."),
        SimulationEvent::ProducerWaiting { serial } => {
            format!("Producer wants to put Yoda #{serial} into buffer...")
        }
        SimulationEvent::Produced { serial, .. } => format!("   Yoda {serial} put on shelf."),
        SimulationEvent::ProductionFinished => {
            "The manufacturer has completed his work for the day.".to_string()
        }
        SimulationEvent::AwaitingConsumers => {
            "Waiting for consumer to buy up the rest.".to_string()
        }
        SimulationEvent::ConsumerWaiting { consumer_id } => {
            format!("Consumer {consumer_id} wants to buy a Yoda...")
        }
        SimulationEvent::Consumed {
            consumer_id,
            serial,
            ..
        } => format!("   Consumer {consumer_id} bought Yoda #{serial}."),
        SimulationEvent::ConsumerExited { consumer_id, .. } => {
            format!("Consumer {consumer_id} goes home.")
        }
        SimulationEvent::SimulationCompleted { .. } => {
            "Producer/Consumer simulation complete!".to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_production_announcements() {
        assert_eq!(
            render(&SimulationEvent::ProductionStarted { total: 3 }).as_str(),
            "Producing 3 today."
        );
        assert_eq!(
            render(&SimulationEvent::Produced {
                serial: 2,
                occupied: 1
            })
            .as_str(),
            "   Yoda 2 put on shelf."
        );
    }

    #[test]
    fn renders_consumer_announcements() {
        assert_eq!(
            render(&SimulationEvent::Consumed {
                consumer_id: 4,
                serial: 9,
                sequence: 9,
                occupied: 0
            })
            .as_str(),
            "   Consumer 4 bought Yoda #9."
        );
        assert_eq!(
            render(&SimulationEvent::ConsumerExited {
                consumer_id: 4,
                consumed: 2
            })
            .as_str(),
            "Consumer 4 goes home."
        );
    }

    #[test]
    fn renders_completion() {
        assert_eq!(
            render(&SimulationEvent::SimulationCompleted { consumed: 3 }).as_str(),
            "Producer/Consumer simulation complete!"
        );
    }
}
