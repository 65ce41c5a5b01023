//! Off-thread entry points: completion callback and (with `async`) a future.

use anyhow::Result;
use std::path::PathBuf;
use std::thread::{self, JoinHandle};

use crate::fs_ops::Filesystem;

use super::engine::Mover;
use super::options::MoveOptions;

impl<F: Filesystem + Clone + 'static> Mover<F> {
    /// Run the move on a worker thread and hand the outcome to `callback` exactly once.
    ///
    /// The returned handle may be joined or dropped; dropping it does not cancel the move.
    pub fn move_with_callback<C>(
        &self,
        src: impl Into<PathBuf>,
        dst: impl Into<PathBuf>,
        options: MoveOptions,
        callback: C,
    ) -> JoinHandle<()>
    where
        C: FnOnce(Result<()>) + Send + 'static,
    {
        let mover = self.clone();
        let (src, dst) = (src.into(), dst.into());
        thread::spawn(move || callback(mover.move_path(&src, &dst, &options)))
    }

    /// Await a move executed on tokio's blocking pool.
    #[cfg(feature = "async")]
    pub async fn move_path_async(
        &self,
        src: impl Into<PathBuf>,
        dst: impl Into<PathBuf>,
        options: MoveOptions,
    ) -> Result<()> {
        use anyhow::Context;

        let mover = self.clone();
        let (src, dst) = (src.into(), dst.into());
        tokio::task::spawn_blocking(move || mover.move_path(&src, &dst, &options))
            .await
            .context("move task did not complete")?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs_ops::StdFs;
    use assert_fs::prelude::*;
    use std::sync::mpsc;

    #[test]
    fn callback_receives_success() {
        let td = assert_fs::TempDir::new().unwrap();
        let src = td.child("a.txt");
        src.write_str("1").unwrap();
        let dst = td.path().join("b.txt");

        let (tx, rx) = mpsc::channel();
        let handle = Mover::new(StdFs::new()).move_with_callback(
            src.path(),
            &dst,
            MoveOptions::default(),
            move |res| tx.send(res.is_ok()).unwrap(),
        );
        handle.join().unwrap();
        assert!(rx.recv().unwrap());
        assert!(dst.exists());
    }

    #[test]
    fn callback_receives_error_once() {
        let td = assert_fs::TempDir::new().unwrap();
        let (tx, rx) = mpsc::channel();
        Mover::new(StdFs::new())
            .move_with_callback(
                td.path().join("missing"),
                td.path().join("dst"),
                MoveOptions::default(),
                move |res| tx.send(res.map_err(|e| e.to_string())).unwrap(),
            )
            .join()
            .unwrap();

        let got = rx.recv().unwrap();
        assert!(got.unwrap_err().contains("Source path not found"));
        assert!(rx.try_recv().is_err());
    }
}
