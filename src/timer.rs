use std::{
    sync::{
        mpsc::{self, RecvTimeoutError, SyncSender},
        Arc,
    },
    thread::{self, JoinHandle},
    time::{Duration, Instant},
};

/// The two countdowns of the chip, both are decremented once per
/// timer tick until they reach zero.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Timers {
    /// Delay timer: This timer is intended to be used for timing the events of games. Its value
    /// can be set and read.
    delay: u8,
    /// Sound timer: This timer is used for sound effects. When its value is nonzero, a beeping
    /// sound is made.
    sound: u8,
}

impl Timers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decrements both timers that are not yet at zero.
    pub fn tick(&mut self) {
        self.delay = self.delay.saturating_sub(1);
        self.sound = self.sound.saturating_sub(1);
    }

    pub fn delay(&self) -> u8 {
        self.delay
    }

    pub fn sound(&self) -> u8 {
        self.sound
    }

    pub fn set_delay(&mut self, value: u8) {
        self.delay = value;
    }

    pub fn set_sound(&mut self, value: u8) {
        self.sound = value;
    }

    /// While true the audio collaborator should play its tone.
    pub fn is_sounding(&self) -> bool {
        self.sound > 0
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Something that calls a callback at a fixed interval until it is stopped.
pub trait TimedWorker {
    fn new() -> Self;
    fn start<T>(&mut self, callback: T, interval: Duration)
    where
        T: Send + FnMut() + 'static;
    fn stop(&mut self);
    fn is_alive(&self) -> bool;
}

/// Is the internal worker, that exists on a
/// second thread.
pub struct Worker {
    /// Contains the actuall thread, that is running.
    thread: Option<JoinHandle<()>>,
    /// Contains the sync sender used to gracefull shutdown the thread.
    shutdown: Option<SyncSender<()>>,
    /// Counts the threads holding on to it, the thread is alive
    /// while there is more then one.
    alive: Arc<()>,
}

impl TimedWorker for Worker {
    /// Will initialize the new worker.
    fn new() -> Self {
        Self {
            thread: None,
            shutdown: None,
            alive: Arc::new(()),
        }
    }

    /// Will start the worker that will run the callback function
    /// every interval.
    /// Attention the worker assumes the callback will finish
    /// faster then the interval.
    fn start<T>(&mut self, mut callback: T, interval: Duration)
    where
        T: Send + FnMut() + 'static,
    {
        // only a single thread per worker
        self.stop();

        let (send, recv) = mpsc::sync_channel::<()>(1);
        let alive = self.alive.clone();
        let thread = thread::spawn(move || {
            let _alive = alive;
            let mut timeout = interval;
            loop {
                match recv.recv_timeout(timeout) {
                    Err(RecvTimeoutError::Timeout) => {
                        let start = Instant::now();

                        callback();

                        // make sure there the system will at most wait the interval
                        timeout = interval.saturating_sub(start.elapsed());
                    }
                    Ok(_) | Err(_) => break, // shutdown
                }
            }
        });

        self.thread = Some(thread);
        self.shutdown = Some(send);
    }

    /// Will stop the worker.
    fn stop(&mut self) {
        // Will stop the worker, in two steps one by sending an empty message
        // and second by droping the only sender for the given receiver.
        if let Some(sender) = self.shutdown.take() {
            // the thread might already be gone if the callback panicked
            let _ = sender.send(());
        }
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                log::error!("The worker thread panicked.");
            }
        }
    }

    /// Checks if the thread is alive.
    fn is_alive(&self) -> bool {
        Arc::strong_count(&self.alive) > 1
    }
}

impl Drop for Worker {
    /// Will drop the worker
    fn drop(&mut self) {
        self.stop();
    }
}
