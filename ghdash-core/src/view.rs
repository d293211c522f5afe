//! Read-only snapshot handed to the presentation layer

use serde::Serialize;

use crate::error::FetchError;
use crate::filter::{FilterState, Placeholder};
use crate::kind::EntityKind;
use crate::model::Item;
use crate::state::ListState;

/// Everything a view needs to render one list
#[derive(Debug, Clone, Serialize)]
pub struct ListView {
    pub subject: String,
    pub kind: EntityKind,
    /// Items passing the current filters, in server order
    pub items: Vec<Item>,
    /// Count of items loaded, filtered or not
    pub total_loaded: usize,
    pub current_page: u32,
    pub is_loading: bool,
    pub has_more: bool,
    #[serde(serialize_with = "serialize_error")]
    pub last_error: Option<FetchError>,
    pub is_empty: bool,
    pub no_matches: bool,
    pub placeholder: Option<Placeholder>,
    pub can_load_more: bool,
    pub filter: FilterState,
}

impl From<&ListState> for ListView {
    fn from(state: &ListState) -> Self {
        Self {
            subject: state.subject().to_string(),
            kind: state.kind(),
            items: state.visible().into_iter().cloned().collect(),
            total_loaded: state.items().len(),
            current_page: state.current_page(),
            is_loading: state.is_loading(),
            has_more: state.has_more(),
            last_error: state.last_error().cloned(),
            is_empty: state.is_empty(),
            no_matches: state.no_matches(),
            placeholder: state.placeholder(),
            can_load_more: state.can_load_more(),
            filter: state.filter().clone(),
        }
    }
}

impl ListView {
    /// Inline error text, if a fetch failure is showing
    pub fn error_message(&self) -> Option<String> {
        self.last_error.as_ref().map(FetchError::user_message)
    }
}

fn serialize_error<S>(error: &Option<FetchError>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    match error {
        Some(err) => serializer.serialize_some(&err.to_string()),
        None => serializer.serialize_none(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::CategoryFilter;
    use crate::test_support::{event, events};

    #[test]
    fn snapshot_reflects_filters() {
        let mut state = ListState::new("octocat", EntityKind::Activity);
        let ticket = state.begin(1).unwrap();
        let mut page = events(0..3);
        page.push(event("fork", "ForkEvent", "octocat", "octocat/spoon"));
        state.finish(&ticket, Ok(page));
        state.set_category(CategoryFilter::new("ForkEvent"));

        let view = ListView::from(&state);
        assert_eq!(view.items.len(), 1);
        assert_eq!(view.total_loaded, 4);
        assert!(!view.is_empty);
        assert!(!view.no_matches);
        assert!(view.can_load_more);
        assert!(view.error_message().is_none());

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["kind"], "activity");
        assert_eq!(json["filter"]["category"], "ForkEvent");
    }
}
