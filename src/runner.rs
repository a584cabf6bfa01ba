use std::{sync::Arc, time::Duration};

use parking_lot::Mutex;

use crate::{
    definitions::timer,
    devices::{AudioCommands, DisplayCommands, SharedKeypad},
    scheduler::Scheduler,
    timer::TimedWorker,
    ProcessError,
};

/// Ticks the shared scheduler at 60 hertz on a worker, the keys are taken from the
/// shared keypad once per tick. The returned worker has to be kept around, it stops
/// the ticking once dropped.
pub fn run<D, A, W>(scheduler: Arc<Mutex<Scheduler<D, A>>>, keypad: SharedKeypad) -> W
where
    D: DisplayCommands + Send + 'static,
    A: AudioCommands + Send + 'static,
    W: TimedWorker + 'static,
{
    let inner_run = move || {
        let keys = keypad.snapshot();
        match scheduler.lock().frame(keys) {
            Ok(_) => {}
            // was already reported when the fault happened
            Err(ProcessError::Halted) => {}
            Err(err) => log::error!("The chipset stopped: {}", err),
        }
    };

    let mut worker = W::new();
    worker.start(inner_run, Duration::from_millis(timer::INTERVAL));

    worker
}
