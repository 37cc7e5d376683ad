//! Prefix tree mapping key sequences to bound values.
//!
//! The same structure serves two levels of input resolution: terminal escape
//! sequences (characters to symbolic keys) and mode keymaps (keys to
//! commands). Children are kept sorted so each step is a binary search.

/// Outcome of matching an input sequence against a [`KeyTrie`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrieMatch<'a, V> {
    /// No bound sequence starts the input.
    NoMatch,
    /// `input[..len]` is bound to `value` and no longer bound sequence can
    /// match the input. `len` may be shorter than the input; the caller
    /// consumes `len` units and matches the rest again.
    Exact { len: usize, value: &'a V },
    /// The whole input is a strict prefix of a bound sequence and no prefix
    /// of the input is bound yet.
    Prefix,
    /// The whole input is a strict prefix of a longer bound sequence, and
    /// `input[..len]` is itself bound to `value`.
    Ambiguous { len: usize, value: &'a V },
}

#[derive(Debug, Clone)]
struct Node<K, V> {
    value: Option<V>,
    children: Vec<(K, Node<K, V>)>,
}

impl<K, V> Default for Node<K, V> {
    fn default() -> Self {
        Self {
            value: None,
            children: Vec::new(),
        }
    }
}

impl<K: Ord, V> Node<K, V> {
    fn is_dead(&self) -> bool {
        self.value.is_none() && self.children.is_empty()
    }

    fn child(&self, key: &K) -> Option<&Node<K, V>> {
        self.children
            .binary_search_by(|(k, _)| k.cmp(key))
            .ok()
            .map(|i| &self.children[i].1)
    }

    fn remove(&mut self, seq: &[K]) -> Option<V> {
        let Some((first, rest)) = seq.split_first() else {
            return self.value.take();
        };
        let i = self.children.binary_search_by(|(k, _)| k.cmp(first)).ok()?;
        let removed = self.children[i].1.remove(rest);
        if self.children[i].1.is_dead() {
            self.children.remove(i);
        }
        removed
    }
}

/// A trie keyed by sequences of `K` holding values of type `V`.
#[derive(Debug, Clone)]
pub struct KeyTrie<K, V> {
    root: Node<K, V>,
    len: usize,
}

impl<K, V> Default for KeyTrie<K, V> {
    fn default() -> Self {
        Self {
            root: Node::default(),
            len: 0,
        }
    }
}

impl<K: Ord + Clone, V> KeyTrie<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of bound sequences.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Binds `seq` to `value`, returning the value previously bound to it.
    ///
    /// Binding the empty sequence is ignored.
    pub fn insert(&mut self, seq: &[K], value: V) -> Option<V> {
        if seq.is_empty() {
            return None;
        }
        let mut node = &mut self.root;
        for key in seq {
            let i = match node.children.binary_search_by(|(k, _)| k.cmp(key)) {
                Ok(i) => i,
                Err(i) => {
                    node.children.insert(i, (key.clone(), Node::default()));
                    i
                }
            };
            node = &mut node.children[i].1;
        }
        let old = node.value.replace(value);
        if old.is_none() {
            self.len += 1;
        }
        old
    }

    /// Unbinds `seq`, pruning nodes left without value or children.
    pub fn remove(&mut self, seq: &[K]) -> Option<V> {
        if seq.is_empty() {
            return None;
        }
        let removed = self.root.remove(seq);
        if removed.is_some() {
            self.len -= 1;
        }
        removed
    }

    /// The value bound to exactly `seq`.
    pub fn get(&self, seq: &[K]) -> Option<&V> {
        let mut node = &self.root;
        for key in seq {
            node = node.child(key)?;
        }
        node.value.as_ref()
    }

    /// Matches `input` incrementally. See [`TrieMatch`].
    pub fn lookup(&self, input: &[K]) -> TrieMatch<'_, V> {
        let mut node = &self.root;
        let mut best: Option<(usize, &V)> = None;
        for (depth, key) in input.iter().enumerate() {
            match node.child(key) {
                Some(child) => {
                    node = child;
                    if let Some(v) = &node.value {
                        best = Some((depth + 1, v));
                    }
                }
                None => {
                    return match best {
                        Some((len, value)) => TrieMatch::Exact { len, value },
                        None => TrieMatch::NoMatch,
                    };
                }
            }
        }

        if node.children.is_empty() {
            match best {
                Some((len, value)) => TrieMatch::Exact { len, value },
                None => TrieMatch::NoMatch,
            }
        } else {
            match best {
                Some((len, value)) => TrieMatch::Ambiguous { len, value },
                None => TrieMatch::Prefix,
            }
        }
    }

    /// All bound `(sequence, value)` pairs in key order.
    pub fn iter(&self) -> Vec<(Vec<K>, &V)> {
        fn walk<'a, K: Clone, V>(
            node: &'a Node<K, V>,
            path: &mut Vec<K>,
            out: &mut Vec<(Vec<K>, &'a V)>,
        ) {
            if let Some(v) = &node.value {
                out.push((path.clone(), v));
            }
            for (k, child) in &node.children {
                path.push(k.clone());
                walk(child, path, out);
                path.pop();
            }
        }

        let mut out = Vec::with_capacity(self.len);
        walk(&self.root, &mut Vec::new(), &mut out);
        out
    }
}
