use serde::{Deserialize, Serialize};

/// Page-ordered plain text of one document (page 0 first)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageCorpus {
    pages: Vec<String>,
}

impl PageCorpus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pages<I, S>(pages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            pages: pages.into_iter().map(Into::into).collect(),
        }
    }

    pub fn push(&mut self, page: impl Into<String>) {
        self.pages.push(page.into());
    }

    pub fn pages(&self) -> &[String] {
        &self.pages
    }

    pub fn page(&self, index: usize) -> Option<&str> {
        self.pages.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Total characters across all pages
    pub fn char_count(&self) -> usize {
        self.pages.iter().map(|p| p.chars().count()).sum()
    }
}

impl<S: Into<String>> FromIterator<S> for PageCorpus {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self::from_pages(iter)
    }
}
