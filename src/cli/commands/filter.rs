//! The `logmask filter` command.
//!
//! Streams input through a [`MaskingWriter`] in fixed-size chunks. Chunk
//! boundaries fall anywhere, including inside a secret; the writer
//! reassembles lines before matching.

use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use crate::cli::args::FilterArgs;
use crate::config::MaskConfig;
use crate::error::Result;
use crate::secrets::MaskingWriter;

use super::dispatcher::{Command, CommandResult};
use super::shared::build_masker;

/// The filter command implementation.
pub struct FilterCommand {
    working_dir: PathBuf,
    config: MaskConfig,
    args: FilterArgs,
}

impl FilterCommand {
    /// Create a new filter command.
    pub fn new(working_dir: &Path, config: MaskConfig, args: FilterArgs) -> Self {
        Self {
            working_dir: working_dir.to_path_buf(),
            config,
            args,
        }
    }

    fn chunk_size(&self) -> usize {
        self.args
            .chunk_size
            .unwrap_or(self.config.settings.chunk_size)
            .max(1)
    }
}

impl Command for FilterCommand {
    fn execute(&self, out: &mut dyn Write) -> Result<CommandResult> {
        let masker = build_masker(&self.config, &self.args.sources, &self.working_dir)?;
        if masker.pattern_count() == 0 {
            tracing::warn!("No maskable secrets configured; input is passed through unchanged");
        }

        let mut input: Box<dyn Read> = match &self.args.input {
            Some(path) => Box::new(File::open(path)?),
            None => Box::new(io::stdin().lock()),
        };

        let chunk_size = self.chunk_size();
        let total = match &self.args.output {
            Some(path) => {
                let file = BufWriter::new(File::create(path)?);
                pump(&mut input, masker.writer(file), chunk_size)?
            }
            None => pump(&mut input, masker.writer(out), chunk_size)?,
        };

        tracing::debug!("Filtered {} byte(s)", total);
        Ok(CommandResult::success())
    }
}

/// Copy `input` into `writer` in chunks of `chunk_size`, then close it.
///
/// Returns the number of input bytes consumed.
pub fn pump<R, W>(
    input: &mut R,
    mut writer: MaskingWriter<'_, W>,
    chunk_size: usize,
) -> io::Result<u64>
where
    R: Read + ?Sized,
    W: Write,
{
    let mut buf = vec![0u8; chunk_size];
    let mut total = 0u64;

    loop {
        let n = match input.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        writer.write_all(&buf[..n])?;
        total += n as u64;
    }

    writer.close()?;
    Ok(total)
}
