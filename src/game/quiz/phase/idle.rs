use std::time::Duration;

use crate::game::quiz::State;

#[derive(Debug, Default)]
pub struct IdleState;

impl State for IdleState {
    fn on_begin(&mut self) {}

    fn on_tick(&mut self, _dt: Duration) {}

    fn on_end(&mut self) {}

    fn is_over(&self) -> bool {
        false
    }
}
