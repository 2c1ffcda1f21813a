// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use url::Url;

use crate::model::ServiceKind;

pub const SERVICE_PARAM: &str = "service";

pub fn service_param(url: &Url) -> Option<String> {
    url.query_pairs()
        .find(|(key, _)| key == SERVICE_PARAM)
        .map(|(_, value)| value.into_owned())
}

/// Active service encoded in a deep link; unknown or missing values mean pest.
pub fn service_from_url(url: &Url) -> ServiceKind {
    service_param(url)
        .map(|value| ServiceKind::from_query(&value))
        .unwrap_or(ServiceKind::Pest)
}

/// Rewrites the `service` parameter, keeping every other parameter in place.
pub fn url_with_service(url: &Url, service: ServiceKind) -> Url {
    let mut pairs: Vec<(String, String)> = Vec::new();
    let mut replaced = false;
    for (key, value) in url.query_pairs() {
        if key == SERVICE_PARAM {
            if !replaced {
                pairs.push((key.into_owned(), service.query_value().to_owned()));
                replaced = true;
            }
        } else {
            pairs.push((key.into_owned(), value.into_owned()));
        }
    }
    if !replaced {
        pairs.push((SERVICE_PARAM.to_owned(), service.query_value().to_owned()));
    }

    let mut next = url.clone();
    next.query_pairs_mut().clear().extend_pairs(pairs);
    next
}

/// In-process stand-in for browser history: a list of visited deep links
/// with a cursor. Pushing after going back drops the forward entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationHistory {
    entries: Vec<Url>,
    index: usize,
}

impl NavigationHistory {
    pub fn new(initial: Url) -> Self {
        Self {
            entries: vec![initial],
            index: 0,
        }
    }

    pub fn current(&self) -> &Url {
        &self.entries[self.index]
    }

    pub fn current_service(&self) -> ServiceKind {
        service_from_url(self.current())
    }

    pub fn push(&mut self, url: Url) {
        self.entries.truncate(self.index + 1);
        self.entries.push(url);
        self.index = self.entries.len() - 1;
    }

    pub fn can_go_back(&self) -> bool {
        self.index > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.index + 1 < self.entries.len()
    }

    pub fn back(&mut self) -> Option<&Url> {
        if !self.can_go_back() {
            return None;
        }
        self.index -= 1;
        Some(self.current())
    }

    pub fn forward(&mut self) -> Option<&Url> {
        if !self.can_go_forward() {
            return None;
        }
        self.index += 1;
        Some(self.current())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{NavigationHistory, service_from_url, url_with_service};
    use crate::model::ServiceKind;
    use url::Url;

    fn parse(raw: &str) -> Url {
        Url::parse(raw).expect("test url should parse")
    }

    #[test]
    fn reads_service_param_leniently() {
        assert_eq!(
            service_from_url(&parse("https://booking.local/?service=clean")),
            ServiceKind::Cleaning
        );
        assert_eq!(
            service_from_url(&parse("https://booking.local/?service=cleaning")),
            ServiceKind::Cleaning
        );
        assert_eq!(
            service_from_url(&parse("https://booking.local/?service=garden")),
            ServiceKind::Pest
        );
        assert_eq!(
            service_from_url(&parse("https://booking.local/")),
            ServiceKind::Pest
        );
    }

    #[test]
    fn writes_clean_and_keeps_other_params() {
        let url = parse("https://booking.local/?ref=flyer&service=pest&lang=zh&service=x");
        let next = url_with_service(&url, ServiceKind::Cleaning);
        assert_eq!(
            next.as_str(),
            "https://booking.local/?ref=flyer&service=clean&lang=zh"
        );

        let bare = url_with_service(&parse("https://booking.local/"), ServiceKind::Pest);
        assert_eq!(bare.as_str(), "https://booking.local/?service=pest");
    }

    #[test]
    fn back_and_forward_walk_entries() {
        let start = parse("https://booking.local/");
        let mut history = NavigationHistory::new(start.clone());
        assert!(history.back().is_none());

        history.push(url_with_service(&start, ServiceKind::Cleaning));
        assert_eq!(history.current_service(), ServiceKind::Cleaning);

        assert_eq!(history.back(), Some(&start));
        assert_eq!(history.current_service(), ServiceKind::Pest);
        assert!(history.can_go_forward());

        history.forward();
        assert_eq!(history.current_service(), ServiceKind::Cleaning);
        assert!(history.forward().is_none());
    }

    #[test]
    fn push_after_back_drops_forward_entries() {
        let start = parse("https://booking.local/");
        let mut history = NavigationHistory::new(start.clone());
        history.push(url_with_service(&start, ServiceKind::Cleaning));
        history.push(url_with_service(&start, ServiceKind::Pest));
        history.back();
        history.back();
        history.push(url_with_service(&start, ServiceKind::Cleaning));
        assert_eq!(history.len(), 2);
        assert!(!history.can_go_forward());
    }
}
