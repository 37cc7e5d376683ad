//! Inline suggestions from previously entered lines.

#[derive(Debug, Clone, Default)]
struct Node {
    /// Lines recorded through this node.
    count: usize,
    /// Lines recorded ending exactly here.
    ends: usize,
    children: Vec<(char, Node)>,
}

impl Node {
    fn child(&self, c: char) -> Option<&Node> {
        self.children
            .binary_search_by(|(k, _)| k.cmp(&c))
            .ok()
            .map(|i| &self.children[i].1)
    }

    fn child_mut(&mut self, c: char) -> &mut Node {
        let i = match self.children.binary_search_by(|(k, _)| k.cmp(&c)) {
            Ok(i) => i,
            Err(i) => {
                self.children.insert(i, (c, Node::default()));
                i
            }
        };
        &mut self.children[i].1
    }

    fn most_frequent_child(&self) -> Option<(char, &Node)> {
        let mut best: Option<(char, &Node)> = None;
        for (c, child) in &self.children {
            if best.is_none_or(|(_, b)| child.count > b.count) {
                best = Some((*c, child));
            }
        }
        best
    }
}

/// A frequency trie over entered lines.
#[derive(Debug, Clone, Default)]
pub struct PredictionModel {
    root: Node,
}

impl PredictionModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.root.count == 0
    }

    pub fn record(&mut self, line: &str) {
        if line.is_empty() {
            return;
        }
        let mut node = &mut self.root;
        node.count += 1;
        for c in line.chars() {
            node = node.child_mut(c);
            node.count += 1;
        }
        node.ends += 1;
    }

    /// The most likely continuation of `prefix`, excluding the prefix itself.
    ///
    /// Extension follows the most frequent next character for as long as
    /// more recorded lines continue than end at the current point.
    pub fn predict(&self, prefix: &[char]) -> Option<String> {
        let mut node = &self.root;
        for &c in prefix {
            node = node.child(c)?;
        }
        let mut tail = String::new();
        while let Some((c, child)) = node.most_frequent_child() {
            if node.ends >= child.count {
                break;
            }
            tail.push(c);
            node = child;
        }
        (!tail.is_empty()).then_some(tail)
    }
}
