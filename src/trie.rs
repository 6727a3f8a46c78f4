use std::collections::HashMap;
use std::ops::Deref;

#[derive(Clone, Debug)]
pub struct Trie {
  root: TrieNode,
}

#[derive(Clone, Debug, Default)]
struct TrieNode {
  children: HashMap<char, TrieNode>,
  is_end: bool,
}

impl TrieNode {
  pub fn new() -> Self {
    Self::default()
  }
}

impl Trie {
  pub fn new() -> Self {
    Self { root: TrieNode::new() }
  }

  pub fn insert<T: AsRef<str>>(&mut self, word: T) {
    let str = word.as_ref();
    let len = str.len();
    let mut node = &mut self.root;
    for (index, char) in str.char_indices() {
      let is_end = index + 1 == len;
      node = node.children.entry(char).or_default();
      node.is_end = node.is_end || is_end;
    }
  }

  /// Given a prefix, return a vector of all words that start with that prefix.
  ///
  /// If the prefix is empty, return an empty vector.
  /// Returned Vector of strings is not sorted.
  pub fn get_completions<T: AsRef<str>>(&mut self, prefix: T) -> Vec<String> {
    let str = prefix.as_ref();
    if str.is_empty() {
      return Vec::new();
    }

    let mut node = &mut self.root;
    for char in str.chars() {
      match node.children.get_mut(&char) {
        Some(n) => node = n,
        None => {
          return Vec::new();
        }
      }
    }

    let mut completions: Vec<String> = Vec::new();
    Self::collect_words(node.deref(), str, &mut completions);

    completions
  }

  fn collect_words(node: &TrieNode, prefix: &str, completions: &mut Vec<String>) {
    if node.is_end {
      completions.push(prefix.to_string());
    }

    for (char, child) in node.children.iter() {
      Self::collect_words(child, &format!("{}{}", prefix, char), completions);
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_get_completions() {
    let mut t = Trie::new();
    t.insert("car");
    t.insert("card");
    t.insert("care");
    t.insert("carpet");
    t.insert("carrot");
    t.insert("cat");

    let ca_completions = t.get_completions("ca");
    assert!(ca_completions.contains(&"car".to_string()));
    assert!(ca_completions.contains(&"card".to_string()));
    assert!(ca_completions.contains(&"care".to_string()));
    assert!(ca_completions.contains(&"carpet".to_string()));
    assert!(ca_completions.contains(&"carrot".to_string()));
    assert!(ca_completions.contains(&"cat".to_string()));
    assert_eq!(ca_completions.len(), 6);

    let car_completions = t.get_completions("car");
    assert!(!car_completions.contains(&"cat".to_string()));
    assert_eq!(car_completions.len(), 5);

    let card_completions = t.get_completions("card");
    assert_eq!(card_completions, vec!["card".to_string()]);

    assert!(t.get_completions("z").is_empty());
    assert!(t.get_completions("").is_empty());
  }
}
