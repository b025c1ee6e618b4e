//! Command history: a bounded ring of previously entered lines with optional
//! persistence to a newline-delimited file.
//!
//! Index 0 is always the most recent entry. Empty lines and immediate
//! duplicates are not recorded.

use std::fs;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

pub struct History {
    entries: Vec<Option<String>>,
    capacity: usize,
    size: usize,
    head: usize,
}

impl History {
    /// Create an empty history. A zero capacity is clamped to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: vec![None; capacity],
            capacity,
            size: 0,
            head: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Record a line. Empty lines and a line equal to the most recent entry
    /// are ignored. The oldest entry is evicted once the ring is full.
    pub fn add(&mut self, line: &str) {
        if line.is_empty() {
            return;
        }
        if self.get(0) == Some(line) {
            return;
        }

        self.head = (self.head + 1) % self.capacity;
        self.entries[self.head] = Some(line.to_string());
        if self.size < self.capacity {
            self.size += 1;
        }
    }

    /// The line `index` steps behind the most recent one (0 = most recent).
    pub fn get(&self, index: usize) -> Option<&str> {
        if index >= self.size {
            return None;
        }
        // Ring arithmetic: walk backwards from head, wrapping explicitly
        // instead of relying on unsigned underflow.
        let actual = if index <= self.head {
            self.head - index
        } else {
            self.capacity - (index - self.head)
        };
        self.entries[actual].as_deref()
    }

    /// Entries newest first.
    pub fn iter_recent(&self) -> impl Iterator<Item = &str> {
        (0..self.size).filter_map(|i| self.get(i))
    }

    pub fn clear(&mut self) {
        self.entries = vec![None; self.capacity];
        self.size = 0;
        self.head = 0;
    }

    /// All entries whose text contains `pattern`, newest first.
    pub fn search(&self, pattern: &str) -> Vec<String> {
        self.iter_recent()
            .filter(|line| line.contains(pattern))
            .map(str::to_string)
            .collect()
    }

    /// Write the history to `path`, oldest line first. On unix the file is
    /// restricted to owner read/write.
    pub fn save(&self, path: &Path) -> io::Result<()> {
        let mut file = fs::File::create(path)?;
        for i in (0..self.size).rev() {
            if let Some(line) = self.get(i) {
                writeln!(file, "{line}")?;
            }
        }
        file.flush()?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
        }

        Ok(())
    }

    /// Append lines from `path` in file order. A missing file is not an
    /// error; the history simply starts empty.
    pub fn load(&mut self, path: &Path) -> io::Result<()> {
        let file = match fs::File::open(path) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(()),
            Err(err) => return Err(err),
        };
        for line in BufReader::new(file).lines() {
            self.add(line?.trim_end_matches('\r'));
        }
        Ok(())
    }
}

/// Default history file location: `<home>/.necroshell_history`, falling back
/// to the working directory when no home is known.
pub fn default_history_path() -> PathBuf {
    let base = directories::BaseDirs::new()
        .map(|dirs| dirs.home_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."));
    base.join(".necroshell_history")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recency_order() {
        let mut history = History::new(10);
        history.add("a");
        history.add("b");
        assert_eq!(history.get(0), Some("b"));
        assert_eq!(history.get(1), Some("a"));
        assert_eq!(history.get(2), None);
    }

    #[test]
    fn consecutive_duplicates_collapse() {
        let mut history = History::new(10);
        history.add("a");
        history.add("b");
        history.add("b");
        assert_eq!(history.len(), 2);
        assert_eq!(history.get(0), Some("b"));

        // Non-consecutive repeats are kept.
        history.add("a");
        assert_eq!(history.len(), 3);
    }

    #[test]
    fn empty_lines_ignored() {
        let mut history = History::new(10);
        history.add("");
        assert!(history.is_empty());
    }

    #[test]
    fn ring_evicts_oldest() {
        let mut history = History::new(3);
        for cmd in ["cmd1", "cmd2", "cmd3", "cmd4"] {
            history.add(cmd);
        }
        assert_eq!(history.len(), 3);
        assert_eq!(history.get(0), Some("cmd4"));
        assert_eq!(history.get(1), Some("cmd3"));
        assert_eq!(history.get(2), Some("cmd2"));
        assert_eq!(history.get(3), None);
    }

    #[test]
    fn ring_with_extra_inserts() {
        let capacity = 4;
        let extra = 3;
        let mut history = History::new(capacity);
        for i in 0..capacity + extra {
            history.add(&format!("line{i}"));
        }
        assert_eq!(history.len(), capacity);
        // Oldest retained entry is the (extra+1)-th inserted, zero-based
        // index `extra`.
        assert_eq!(
            history.get(capacity - 1),
            Some(format!("line{extra}").as_str())
        );
    }

    #[test]
    fn search_newest_first() {
        let mut history = History::new(10);
        history.add("raise skeleton");
        history.add("status");
        history.add("raise wraith");

        let matches = history.search("raise");
        assert_eq!(matches, vec!["raise wraith", "raise skeleton"]);
        assert!(history.search("banish").is_empty());
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history");

        let mut history = History::new(10);
        history.add("first");
        history.add("second");
        history.add("third");
        history.save(&path).unwrap();

        // Oldest first on disk.
        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text, "first\nsecond\nthird\n");

        let mut loaded = History::new(10);
        loaded.load(&path).unwrap();
        assert_eq!(loaded.get(0), Some("third"));
        assert_eq!(loaded.get(2), Some("first"));
    }

    #[cfg(unix)]
    #[test]
    fn saved_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history");
        let mut history = History::new(4);
        history.add("secret incantation");
        history.save(&path).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn loading_missing_file_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let mut history = History::new(4);
        assert!(history.load(&dir.path().join("absent")).is_ok());
        assert!(history.is_empty());
    }

    #[test]
    fn clear_empties_the_ring() {
        let mut history = History::new(4);
        history.add("x");
        history.clear();
        assert!(history.is_empty());
        assert_eq!(history.get(0), None);
    }
}
