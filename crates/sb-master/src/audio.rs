//! Audio thread: owns the output device and the synth.
//!
//! The UI thread pushes triggers into a lock-free queue; the audio thread
//! drains it, renders the synth and keeps the device ring buffer topped up.

use ringbuf::traits::{Consumer, Producer, Split};
use ringbuf::{HeapCons, HeapProd, HeapRb};
use sb_audio::{AudioOutput, CpalOutput};
use sb_engine::{Frame, Synth, Trigger};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

/// Pending triggers the queue can hold.
const TRIGGER_QUEUE: usize = 64;

/// Frames rendered per refill of the device buffer.
const RENDER_BLOCK: usize = 128;

/// Handle to a running audio thread.
pub struct AudioLink {
    triggers: HeapProd<Trigger>,
    ready: Arc<AtomicBool>,
    failed: Arc<AtomicBool>,
    stop_signal: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl AudioLink {
    /// Spawn the audio thread. Opening the device happens on that thread;
    /// poll `is_ready` to find out whether it succeeded.
    pub fn start() -> Self {
        let (triggers, consumer) = HeapRb::<Trigger>::new(TRIGGER_QUEUE).split();
        let ready = Arc::new(AtomicBool::new(false));
        let failed = Arc::new(AtomicBool::new(false));
        let stop_signal = Arc::new(AtomicBool::new(false));

        let thread = {
            let ready = ready.clone();
            let failed = failed.clone();
            let stop = stop_signal.clone();
            std::thread::Builder::new()
                .name("sb-audio".into())
                .spawn(move || audio_thread(consumer, ready, failed, stop))
        };

        let thread = match thread {
            Ok(handle) => Some(handle),
            Err(e) => {
                log::warn!("could not spawn audio thread: {}", e);
                failed.store(true, Ordering::Relaxed);
                None
            }
        };

        Self { triggers, ready, failed, stop_signal, thread }
    }

    /// The device is open and the stream is running.
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    /// Opening the device failed; triggers will never sound.
    pub fn has_failed(&self) -> bool {
        self.failed.load(Ordering::Relaxed)
    }

    /// Queue a trigger. Dropped unless the link is ready.
    pub fn trigger(&mut self, trigger: Trigger) -> bool {
        if !self.is_ready() {
            return false;
        }
        self.triggers.try_push(trigger).is_ok()
    }

    /// Stop the audio thread and wait for it to exit.
    pub fn stop(&mut self) {
        self.stop_signal.store(true, Ordering::Relaxed);
        if let Some(handle) = self.thread.take() {
            if handle.join().is_err() {
                log::warn!("audio thread panicked");
            }
        }
        self.ready.store(false, Ordering::Release);
    }
}

impl Drop for AudioLink {
    fn drop(&mut self) {
        self.stop();
    }
}

fn audio_thread(
    mut triggers: HeapCons<Trigger>,
    ready: Arc<AtomicBool>,
    failed: Arc<AtomicBool>,
    stop_signal: Arc<AtomicBool>,
) {
    let mut output = match open_output() {
        Ok(output) => output,
        Err(e) => {
            log::warn!("audio unavailable, beat track will be silent: {}", e);
            failed.store(true, Ordering::Relaxed);
            return;
        }
    };

    let mut synth = Synth::new(output.sample_rate());
    let mut block = [Frame::silence(); RENDER_BLOCK];
    ready.store(true, Ordering::Release);
    log::info!("audio ready at {} Hz", output.sample_rate());

    while !stop_signal.load(Ordering::Relaxed) {
        while let Some(trigger) = triggers.try_pop() {
            synth.trigger(trigger);
        }

        let n = output.vacant().min(RENDER_BLOCK);
        if n == 0 {
            std::thread::sleep(Duration::from_millis(1));
            continue;
        }
        synth.render_into(&mut block[..n]);
        output.write(&block[..n]);
    }

    ready.store(false, Ordering::Release);
    if let Err(e) = output.stop() {
        log::warn!("audio stop failed: {}", e);
    }
}

fn open_output() -> Result<CpalOutput, sb_audio::AudioError> {
    let (mut output, consumer) = CpalOutput::new()?;
    output.build_stream(consumer)?;
    output.start()?;
    Ok(output)
}
