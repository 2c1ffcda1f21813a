// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub const DEFAULT_PLACEHOLDER: &str = "請選擇";
pub const SEARCH_PLACEHOLDER: &str = "搜尋地區...";
pub const NO_MATCHES: &str = "沒有匹配的地區";

/// Dropdown with a type-to-filter query over a fixed option list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchableSelect {
    options: Vec<String>,
    open: bool,
    query: String,
    highlighted: usize,
}

impl SearchableSelect {
    pub fn new<I, S>(options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            options: options.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Opens with the current value highlighted when it is in the list.
    pub fn open(&mut self, current: &str) {
        self.open = true;
        self.query.clear();
        self.highlighted = self
            .options
            .iter()
            .position(|option| option == current)
            .unwrap_or(0);
    }

    pub fn close(&mut self) {
        self.open = false;
        self.query.clear();
        self.highlighted = 0;
    }

    pub fn push_char(&mut self, ch: char) {
        self.query.push(ch);
        self.highlighted = 0;
    }

    pub fn backspace(&mut self) {
        self.query.pop();
        self.highlighted = 0;
    }

    /// Options whose text contains the query, ignoring case.
    pub fn filtered(&self) -> Vec<&str> {
        let needle = self.query.to_lowercase();
        self.options
            .iter()
            .filter(|option| option.to_lowercase().contains(&needle))
            .map(String::as_str)
            .collect()
    }

    pub fn highlighted(&self) -> usize {
        self.highlighted
    }

    pub fn move_highlight(&mut self, delta: isize) {
        let len = self.filtered().len();
        if len == 0 {
            self.highlighted = 0;
            return;
        }
        let next = self.highlighted as isize + delta;
        self.highlighted = next.clamp(0, len as isize - 1) as usize;
    }

    /// Returns the highlighted option and closes the list. An empty filter
    /// result chooses nothing and leaves the list open.
    pub fn choose(&mut self) -> Option<String> {
        let chosen = self
            .filtered()
            .get(self.highlighted)
            .map(|option| (*option).to_owned())?;
        self.close();
        Some(chosen)
    }

    pub fn display_value<'a>(value: &'a str, placeholder: Option<&'a str>) -> &'a str {
        if value.is_empty() {
            placeholder.unwrap_or(DEFAULT_PLACEHOLDER)
        } else {
            value
        }
    }
}
