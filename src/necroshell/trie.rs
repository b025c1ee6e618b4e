//! ASCII prefix tree backing tab completion.
//!
//! Each node has 128 child slots, one per 7-bit character. Terminal nodes own
//! a copy of the complete word so enumeration never has to reassemble paths.
//! Bytes outside the ASCII range never create branches: `insert` skips them
//! (the stored word keeps them intact), while `contains` and `remove` treat
//! them as a miss. Command and flag names are ASCII in practice, so the
//! asymmetry is harmless and keeps the node layout flat.

const ALPHABET_SIZE: usize = 128;

struct TrieNode {
    children: [Option<Box<TrieNode>>; ALPHABET_SIZE],
    /// `Some` marks a terminal and owns the complete word.
    word: Option<String>,
}

impl TrieNode {
    fn new() -> Self {
        Self {
            children: std::array::from_fn(|_| None),
            word: None,
        }
    }
}

pub struct Trie {
    root: TrieNode,
    size: usize,
}

impl Default for Trie {
    fn default() -> Self {
        Self::new()
    }
}

impl Trie {
    pub fn new() -> Self {
        Self {
            root: TrieNode::new(),
            size: 0,
        }
    }

    /// Number of live terminals.
    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Insert a word, creating nodes along the path. Idempotent: inserting a
    /// word that is already present leaves the trie unchanged.
    pub fn insert(&mut self, word: &str) {
        let mut node = &mut self.root;
        for &byte in word.as_bytes() {
            let index = byte as usize;
            if index >= ALPHABET_SIZE {
                // Non-ASCII bytes are not indexable.
                continue;
            }
            node = node.children[index].get_or_insert_with(|| Box::new(TrieNode::new()));
        }
        if node.word.is_none() {
            node.word = Some(word.to_string());
            self.size += 1;
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        match self.walk(word) {
            Some(node) => node.word.is_some(),
            None => false,
        }
    }

    /// Clear the terminal flag for a word. Nodes are not pruned: command sets
    /// are small and bounded, and keeping dead branches avoids parent
    /// bookkeeping. Returns `false` if the word was not present.
    pub fn remove(&mut self, word: &str) -> bool {
        let mut node = &mut self.root;
        for &byte in word.as_bytes() {
            let index = byte as usize;
            if index >= ALPHABET_SIZE {
                return false;
            }
            node = match node.children[index].as_deref_mut() {
                Some(child) => child,
                None => return false,
            };
        }
        if node.word.take().is_some() {
            self.size -= 1;
            true
        } else {
            false
        }
    }

    /// Lazily enumerate every word under `prefix`, depth-first in character
    /// order, each word exactly once. An unknown prefix yields an empty
    /// iterator.
    pub fn enumerate<'a>(&'a self, prefix: &str) -> Matches<'a> {
        let stack = match self.walk(prefix) {
            Some(node) => vec![node],
            None => Vec::new(),
        };
        Matches { stack }
    }

    pub fn clear(&mut self) {
        self.root = TrieNode::new();
        self.size = 0;
    }

    fn walk(&self, path: &str) -> Option<&TrieNode> {
        let mut node = &self.root;
        for &byte in path.as_bytes() {
            let index = byte as usize;
            if index >= ALPHABET_SIZE {
                return None;
            }
            node = node.children[index].as_deref()?;
        }
        Some(node)
    }
}

/// Depth-first cursor over a subtrie. Finite and non-restartable; call
/// [`Trie::enumerate`] again for a fresh pass.
pub struct Matches<'a> {
    stack: Vec<&'a TrieNode>,
}

impl<'a> Iterator for Matches<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        while let Some(node) = self.stack.pop() {
            // Reverse push so low character indexes pop first.
            for child in node.children.iter().rev().flatten() {
                self.stack.push(child);
            }
            if let Some(word) = &node.word {
                return Some(word.as_str());
            }
        }
        None
    }
}
