use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use log::info;

use lemon_core::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
use lemon_core::Frame;

/// Writes `frame` as a plain (P1) PBM image, 1 being a lit pixel
pub fn write_pbm(frame: &Frame, writer: &mut dyn Write) -> io::Result<()> {
    writeln!(writer, "P1")?;
    writeln!(writer, "{} {}", DISPLAY_WIDTH, DISPLAY_HEIGHT)?;
    for row in frame.iter() {
        let line: Vec<String> = row.iter().map(|pixel| pixel.to_string()).collect();
        writeln!(writer, "{}", line.join(" "))?;
    }
    Ok(())
}

/// Saves screenshots as numbered PBM files in a directory
pub struct Capturer {
    directory: PathBuf,
    taken: usize,
}

impl Capturer {
    pub fn new(directory: impl AsRef<Path>) -> Self {
        Capturer {
            directory: directory.as_ref().to_path_buf(),
            taken: 0,
        }
    }

    /// Saves `frame` as the next `capture-NNNN.pbm` and returns where it went
    pub fn capture(&mut self, frame: &Frame) -> io::Result<PathBuf> {
        let path = self.directory.join(format!("capture-{:04}.pbm", self.taken));
        let mut writer = BufWriter::new(File::create(&path)?);
        write_pbm(frame, &mut writer)?;
        writer.flush()?;
        self.taken += 1;
        info!("captured frame to {}", path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_pbm() {
        let mut frame: Frame = [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT];
        frame[0][1] = 1;
        frame[31][63] = 1;

        let mut out = Vec::new();
        write_pbm(&frame, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 2 + DISPLAY_HEIGHT);
        assert_eq!(lines[0], "P1");
        assert_eq!(lines[1], "64 32");
        assert!(lines[2].starts_with("0 1 0 "));
        assert!(lines[33].ends_with(" 0 1"));
        assert_eq!(lines[3].split(' ').count(), DISPLAY_WIDTH);
    }

    #[test]
    fn test_capturer_numbers_files() {
        let directory = std::env::temp_dir().join(format!("lemon-capture-{}", std::process::id()));
        std::fs::create_dir_all(&directory).unwrap();
        let frame: Frame = [[1; DISPLAY_WIDTH]; DISPLAY_HEIGHT];

        let mut capturer = Capturer::new(&directory);
        let first = capturer.capture(&frame).unwrap();
        let second = capturer.capture(&frame).unwrap();

        assert!(first.ends_with("capture-0000.pbm"));
        assert!(second.ends_with("capture-0001.pbm"));
        let text = std::fs::read_to_string(&second).unwrap();
        assert!(text.starts_with("P1\n64 32\n1 1"));

        std::fs::remove_dir_all(&directory).unwrap();
    }
}
