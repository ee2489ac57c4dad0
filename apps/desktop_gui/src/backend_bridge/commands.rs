//! Backend commands queued from UI to backend worker.

use client_core::Effect;

pub enum BackendCommand {
    Run(Effect),
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::Run(effect) => effect.name(),
        }
    }
}
