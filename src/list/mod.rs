//! Ordered list with a cursor and two overlapping selection mechanisms.
//!
//! An index is selected when exactly one of the manual set and the visual
//! range covers it. A manually selected song inside an active visual range
//! therefore reads as unselected until it is toggled again.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisualRange {
    pub min: usize,
    pub max: usize,
    pub start: usize,
}

impl VisualRange {
    fn anchored(start: usize, cursor: usize) -> Self {
        Self {
            min: start.min(cursor),
            max: start.max(cursor),
            start,
        }
    }

    pub fn contains(&self, index: usize) -> bool {
        (self.min..=self.max).contains(&index)
    }
}

#[derive(Debug, Clone)]
pub struct List<T> {
    items: Vec<T>,
    cursor: usize,
    manual: BTreeSet<usize>,
    visual: Option<VisualRange>,
}

impl<T> List<T> {
    pub fn new() -> Self {
        Self::from(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn cursor_item(&self) -> Option<&T> {
        self.items.get(self.cursor)
    }

    /// Clamps `index` into the list and drags an active visual range along,
    /// keeping its start fixed.
    pub fn set_cursor(&mut self, index: usize) {
        self.cursor = index.min(self.items.len().saturating_sub(1));
        if let Some(visual) = self.visual {
            self.visual = Some(VisualRange::anchored(visual.start, self.cursor));
        }
    }

    pub fn move_cursor(&mut self, delta: isize) {
        self.set_cursor(self.cursor.saturating_add_signed(delta));
    }

    pub fn selected(&self, index: usize) -> bool {
        let manual = self.manual.contains(&index);
        let visual = self.visual.is_some_and(|range| range.contains(index));
        manual ^ visual
    }

    pub fn set_selected(&mut self, index: usize, selected: bool) {
        if index >= self.items.len() {
            return;
        }
        if selected {
            self.manual.insert(index);
        } else {
            self.manual.remove(&index);
        }
    }

    pub fn toggle_selected(&mut self, index: usize) {
        let selected = self.manual.contains(&index);
        self.set_selected(index, !selected);
    }

    pub fn visual(&self) -> Option<VisualRange> {
        self.visual
    }

    pub fn has_visual_selection(&self) -> bool {
        self.visual.is_some()
    }

    pub fn enable_visual_selection(&mut self) {
        if self.items.is_empty() {
            return;
        }
        self.visual = Some(VisualRange::anchored(self.cursor, self.cursor));
    }

    pub fn disable_visual_selection(&mut self) {
        self.visual = None;
    }

    pub fn toggle_visual_selection(&mut self) {
        if self.visual.is_some() {
            self.disable_visual_selection();
        } else {
            self.enable_visual_selection();
        }
    }

    /// Folds the visual range into the manual set with the same
    /// exclusive-or rule and drops the overlay. The effective selection is
    /// unchanged.
    pub fn commit_visual_selection(&mut self) {
        let Some(range) = self.visual.take() else {
            return;
        };
        for index in range.min..=range.max {
            if !self.manual.remove(&index) {
                self.manual.insert(index);
            }
        }
    }

    pub fn clear_selection(&mut self) {
        self.manual.clear();
        self.visual = None;
    }

    pub fn select_all(&mut self) {
        self.visual = None;
        self.manual = (0..self.items.len()).collect();
    }

    pub fn has_selection(&self) -> bool {
        (0..self.items.len()).any(|index| self.selected(index))
    }

    /// Sorted selected indices, or just the cursor when nothing is selected
    /// on a non-empty list.
    pub fn selection_indices(&self) -> Vec<usize> {
        let indices: Vec<usize> = (0..self.items.len())
            .filter(|index| self.selected(*index))
            .collect();
        if indices.is_empty() && !self.items.is_empty() {
            return vec![self.cursor];
        }
        indices
    }

    pub fn selection(&self) -> Vec<&T> {
        self.selection_indices()
            .into_iter()
            .filter_map(|index| self.items.get(index))
            .collect()
    }

    /// Removes the given indices and returns the removed items in list
    /// order. The selection is cleared and the cursor lands on the first
    /// removed position.
    pub fn remove(&mut self, indices: &[usize]) -> Vec<T> {
        let targets: BTreeSet<usize> = indices
            .iter()
            .copied()
            .filter(|index| *index < self.items.len())
            .collect();
        let Some(first) = targets.first().copied() else {
            return Vec::new();
        };

        let mut removed = Vec::with_capacity(targets.len());
        let mut kept = Vec::with_capacity(self.items.len() - targets.len());
        for (index, item) in std::mem::take(&mut self.items).into_iter().enumerate() {
            if targets.contains(&index) {
                removed.push(item);
            } else {
                kept.push(item);
            }
        }
        self.items = kept;
        self.clear_selection();
        self.set_cursor(first);
        removed
    }

    /// Inserts `items` before position `at`, clamped to the list end. The
    /// selection is cleared since indices shift.
    pub fn insert(&mut self, at: usize, items: Vec<T>) {
        let at = at.min(self.items.len());
        self.items.splice(at..at, items);
        self.clear_selection();
        self.set_cursor(self.cursor);
    }

    /// Stable sort. The selection is cleared, the cursor keeps its index.
    pub fn sort_by(&mut self, compare: impl FnMut(&T, &T) -> Ordering) {
        self.items.sort_by(compare);
        self.clear_selection();
    }
}

impl<T> Default for List<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> From<Vec<T>> for List<T> {
    fn from(items: Vec<T>) -> Self {
        Self {
            items,
            cursor: 0,
            manual: BTreeSet::new(),
            visual: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Song {
    pub uri: String,
    pub tags: BTreeMap<String, String>,
}

impl Song {
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            tags: BTreeMap::new(),
        }
    }

    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }

    pub fn tag(&self, key: &str) -> Option<&str> {
        if key == "file" {
            return Some(&self.uri);
        }
        self.tags.get(key).map(String::as_str)
    }
}

pub type Songlist = List<Song>;

impl Songlist {
    /// Applies one stable sort per tag, in order, so the last tag is the
    /// most significant key.
    pub fn sort_by_tags(&mut self, tags: &[String]) {
        for tag in tags {
            self.sort_by(|a, b| compare_tag(a.tag(tag), b.tag(tag)));
        }
    }

    /// Every tag name present on at least one song, plus `file`.
    pub fn tag_names(&self) -> Vec<String> {
        let mut names: BTreeSet<String> = self
            .items()
            .iter()
            .flat_map(|song| song.tags.keys().cloned())
            .collect();
        names.insert("file".to_string());
        names.into_iter().collect()
    }

    pub fn position_of(&self, uri: &str) -> Option<usize> {
        self.items().iter().position(|song| song.uri == uri)
    }
}

/// Missing tags sort first. Values with a leading number (`3/12`, `1999`)
/// compare numerically, everything else case-insensitively.
fn compare_tag(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => match (leading_number(a), leading_number(b)) {
            (Some(x), Some(y)) => x.cmp(&y),
            _ => a.to_lowercase().cmp(&b.to_lowercase()),
        },
    }
}

fn leading_number(value: &str) -> Option<u64> {
    let digits: String = value.chars().take_while(char::is_ascii_digit).collect();
    digits.parse().ok()
}

#[cfg(test)]
mod tests;
