//! Prefix trie for string sets with completion
//!
//! Each node maps the next `char` to a child node and records whether a
//! stored word ends at it. Removal walks down recursively and every level
//! reports back whether it has become empty, so the parent can drop the
//! child without any back-pointers.

use std::collections::HashMap;

use ahash::RandomState;

#[derive(Debug, Default, Clone)]
struct TrieNode {
    children: HashMap<char, TrieNode, RandomState>,
    terminal: bool,
}

impl TrieNode {
    fn is_empty(&self) -> bool {
        !self.terminal && self.children.is_empty()
    }

    fn find(&self, word: &str) -> Option<&TrieNode> {
        let mut node = self;
        for ch in word.chars() {
            node = node.children.get(&ch)?;
        }
        Some(node)
    }

    /// Remove the word spelled by `chars` below this node.
    ///
    /// Returns `(removed, prune)`: whether the word was present, and whether
    /// this node is now empty and can be dropped by its parent.
    fn remove(&mut self, mut chars: std::str::Chars<'_>) -> (bool, bool) {
        let removed = match chars.next() {
            None => std::mem::take(&mut self.terminal),
            Some(ch) => {
                let Some(child) = self.children.get_mut(&ch) else {
                    return (false, false);
                };
                let (removed, prune) = child.remove(chars);
                if prune {
                    self.children.remove(&ch);
                }
                removed
            }
        };
        (removed, self.is_empty())
    }

    fn collect(&self, prefix: &mut String, out: &mut Vec<String>) {
        if self.terminal {
            out.push(prefix.clone());
        }
        for (ch, child) in &self.children {
            prefix.push(*ch);
            child.collect(prefix, out);
            prefix.pop();
        }
    }
}

/// Set of strings optimised for prefix lookups
#[derive(Debug, Default, Clone)]
pub struct Trie {
    root: TrieNode,
    len: usize,
}

impl Trie {
    /// Create an empty trie
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored words
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the trie holds no words
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Remove every word
    pub fn clear(&mut self) {
        self.root = TrieNode::default();
        self.len = 0;
    }

    /// Add a word, returning `false` if it was already present
    pub fn insert(&mut self, word: &str) -> bool {
        let mut node = &mut self.root;
        for ch in word.chars() {
            node = node.children.entry(ch).or_default();
        }
        if node.terminal {
            return false;
        }
        node.terminal = true;
        self.len += 1;
        true
    }

    /// Check whether a word is stored
    pub fn contains(&self, word: &str) -> bool {
        self.root.find(word).is_some_and(|node| node.terminal)
    }

    /// Check whether every word is stored
    pub fn contains_all<'a, I>(&self, words: I) -> bool
    where
        I: IntoIterator<Item = &'a str>,
    {
        words.into_iter().all(|word| self.contains(word))
    }

    /// Every stored word starting with `prefix`, in lexicographic order
    pub fn complete(&self, prefix: &str) -> Vec<String> {
        let mut out = Vec::new();
        if let Some(node) = self.root.find(prefix) {
            let mut buf = prefix.to_string();
            node.collect(&mut buf, &mut out);
        }
        out.sort_unstable();
        out
    }

    /// Remove a word, returning `false` if it was not stored
    pub fn remove(&mut self, word: &str) -> bool {
        let (removed, _) = self.root.remove(word.chars());
        if removed {
            self.len -= 1;
        }
        removed
    }

    /// Number of nodes below the root, for checking that removal prunes
    #[cfg(test)]
    fn node_count(&self) -> usize {
        fn count(node: &TrieNode) -> usize {
            node.children.values().map(|child| 1 + count(child)).sum()
        }
        count(&self.root)
    }
}

impl<'a> Extend<&'a str> for Trie {
    fn extend<I: IntoIterator<Item = &'a str>>(&mut self, iter: I) {
        for word in iter {
            self.insert(word);
        }
    }
}

impl<'a> FromIterator<&'a str> for Trie {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut trie = Self::new();
        trie.extend(iter);
        trie
    }
}
