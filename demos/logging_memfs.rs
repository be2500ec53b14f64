//! Wrap an in-memory filesystem and watch the calls go by.
//!
//! Run with: `cargo run --example logging_memfs`

use logfs::{
    Basic, Dir, FileMode, FilesystemExt, LayerExt, LoggingLayer, MemoryFs, Symlink, TracingSink,
    wrap,
};
use std::path::Path;

fn main() -> Result<(), logfs::FsError> {
    // Plain closure sink: lines go to stderr.
    let fs = MemoryFs::new().layer(LoggingLayer::new(|line: &str| eprintln!("[fs] {line}")));

    fs.mkdir_all(Path::new("/docs"), FileMode::from_perm(0o755))?;
    fs.write_file(Path::new("/docs/readme.md"), b"# logfs")?;
    fs.symlink(Path::new("/docs/readme.md"), Path::new("/README"))?;
    println!("readme: {}", fs.read_to_string(Path::new("/README"))?);

    for entry in fs.read_dir(Path::new("/"))? {
        println!("{entry}");
    }
    if let Err(err) = fs.stat(Path::new("missing.txt")) {
        println!("stat failed as expected: {err}");
    }

    // The same filesystem, reported through `tracing`.
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();
    let traced = wrap(fs.into_inner(), TracingSink::new());
    traced.remove(Path::new("/README"))?;
    traced.stat(Path::new("/docs"))?;

    Ok(())
}
