use eframe::egui;
use futures::channel::oneshot;

/// A value being produced on a worker thread, delivered at most once.
///
/// The UI polls with [`Pending::try_take`] every frame; nothing blocks the
/// frame loop. Dropping a `Pending` does not stop the worker, its result is
/// simply discarded.
pub struct Pending<T> {
    rx: Option<oneshot::Receiver<T>>,
}

impl<T> std::fmt::Debug for Pending<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pending")
            .field("done", &self.is_done())
            .finish()
    }
}

/// Run `job` on its own thread and hand back a [`Pending`] for its result.
///
/// When `ctx` is given a repaint is requested as soon as the result is sent,
/// so the next frame picks it up.
pub fn spawn<T, F>(ctx: Option<egui::Context>, job: F) -> Pending<T>
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    let (tx, rx) = oneshot::channel();
    std::thread::spawn(move || {
        let value = job();
        // The receiver may be gone already; the result is then dropped.
        let _ = tx.send(value);
        if let Some(ctx) = ctx {
            ctx.request_repaint();
        }
    });
    Pending { rx: Some(rx) }
}

impl<T> Pending<T> {
    /// Take the result if it has arrived. Returns `Some` exactly once.
    pub fn try_take(&mut self) -> Option<T> {
        let rx = self.rx.as_mut()?;
        match rx.try_recv() {
            Ok(Some(value)) => {
                self.rx = None;
                Some(value)
            }
            Ok(None) => None,
            Err(oneshot::Canceled) => {
                // Worker panicked before sending.
                self.rx = None;
                None
            }
        }
    }

    /// Whether the result was taken or the worker is gone.
    pub fn is_done(&self) -> bool {
        self.rx.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    fn poll_until<T>(pending: &mut Pending<T>) -> Option<T> {
        let deadline = Instant::now() + Duration::from_secs(5);
        while Instant::now() < deadline {
            if let Some(v) = pending.try_take() {
                return Some(v);
            }
            if pending.is_done() {
                return None;
            }
            std::thread::sleep(Duration::from_millis(5));
        }
        None
    }

    #[test]
    fn result_is_delivered_once() {
        let mut pending = spawn(None, || 21 * 2);
        assert_eq!(poll_until(&mut pending), Some(42));
        assert!(pending.is_done());
        assert_eq!(pending.try_take(), None);
    }

    #[test]
    fn slow_job_is_pending_until_sent() {
        let (release, gate) = std::sync::mpsc::channel::<()>();
        let mut pending = spawn(None, move || {
            let _ = gate.recv();
            "done".to_string()
        });
        assert_eq!(pending.try_take(), None);
        assert!(!pending.is_done());
        release.send(()).unwrap();
        assert_eq!(poll_until(&mut pending).as_deref(), Some("done"));
    }

    #[test]
    fn panicking_job_resolves_to_nothing() {
        let mut pending: Pending<u8> = spawn(None, || panic!("worker failed"));
        assert_eq!(poll_until(&mut pending), None);
        assert!(pending.is_done());
    }
}
