use std::fmt;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use log::warn;

// @module: Fragment assembly and SRT rendering

/// A terminal, independently timed piece of subtitle text. Produced either by
/// span realignment (exact timing) or by proportional redistribution (derived
/// timing); fragments exist only to be sorted and rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    // @field: Start time in ms
    pub start_ms: u64,

    // @field: End time in ms
    pub end_ms: u64,

    // @field: Cue text
    pub text: String,
}

impl Fragment {
    /// Create a new fragment
    pub fn new(start_ms: u64, end_ms: u64, text: String) -> Self {
        Fragment { start_ms, end_ms, text }
    }

    /// Convert start time to formatted SRT timestamp
    pub fn format_start_time(&self) -> String {
        Self::format_timestamp(self.start_ms)
    }

    /// Convert end time to formatted SRT timestamp
    pub fn format_end_time(&self) -> String {
        Self::format_timestamp(self.end_ms)
    }

    /// Format a timestamp in milliseconds to SRT format (HH:MM:SS,mmm)
    pub fn format_timestamp(ms: u64) -> String {
        let hours = ms / 3_600_000;
        let minutes = (ms % 3_600_000) / 60_000;
        let seconds = (ms % 60_000) / 1_000;
        let millis = ms % 1_000;

        format!("{:02}:{:02}:{:02},{:03}", hours, minutes, seconds, millis)
    }
}

/// Ordered collection of fragments ready for rendering
#[derive(Debug, Clone, Default)]
pub struct SubtitleTrack {
    /// Fragments sorted ascending by start time
    pub fragments: Vec<Fragment>,
}

impl SubtitleTrack {
    /// Assemble fragments into a track, sorting by start time.
    ///
    /// The sort is stable so fragments sharing a start time keep their
    /// insertion order. Overlapping ranges are accepted and rendered as-is;
    /// overlap correction is deliberately left to the caller.
    pub fn assemble(mut fragments: Vec<Fragment>) -> Self {
        if fragments.is_empty() {
            warn!("Assembling an empty fragment list");
        }

        fragments.sort_by_key(|f| f.start_ms);
        SubtitleTrack { fragments }
    }

    /// Render the track as SRT text with 1-based sequential indices
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (n, fragment) in self.fragments.iter().enumerate() {
            out.push_str(&format!("{}\n", n + 1));
            out.push_str(&format!(
                "{} --> {}\n",
                fragment.format_start_time(),
                fragment.format_end_time()
            ));
            out.push_str(&fragment.text);
            out.push_str("\n\n");
        }
        out
    }

    /// Write the track to an SRT file
    pub fn write_to_srt<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();

        // Create parent directory if needed
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let mut file = File::create(path)
            .with_context(|| format!("Failed to create subtitle file: {}", path.display()))?;
        file.write_all(self.render().as_bytes())
            .with_context(|| format!("Failed to write subtitle file: {}", path.display()))?;

        Ok(())
    }
}

impl fmt::Display for SubtitleTrack {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Subtitle Track")?;
        writeln!(f, "Fragments: {}", self.fragments.len())?;
        Ok(())
    }
}
