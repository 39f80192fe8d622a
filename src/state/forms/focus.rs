//! Keyboard focus over the live form
//!
//! Focus targets name entries by key, never by position, so removing an
//! entry above the focused one leaves focus where the user put it.

use super::form_state::FormSession;
use super::group::EntryKey;
use super::record::BaseField;

/// Something that can hold keyboard focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusTarget {
    Base(BaseField),
    EntryField { key: EntryKey, field: &'static str },
    RemoveEntry(EntryKey),
    AddEntry,
    Submit,
}

impl FocusTarget {
    /// The entry this target belongs to, if any
    pub fn entry_key(&self) -> Option<EntryKey> {
        match self {
            Self::EntryField { key, .. } | Self::RemoveEntry(key) => Some(*key),
            _ => None,
        }
    }
}

/// Focusable targets in display order for the session as it is now
pub fn focus_order(session: &FormSession) -> Vec<FocusTarget> {
    let mut order: Vec<FocusTarget> = BaseField::ALL.into_iter().map(FocusTarget::Base).collect();

    if let Some(content_type) = session.active_content_type() {
        let fields = FormSession::fields(content_type);
        let can_remove = session.can_remove(content_type);
        for key in session.entry_keys(content_type) {
            order.extend(
                fields
                    .iter()
                    .map(|spec| FocusTarget::EntryField { key, field: spec.name }),
            );
            if can_remove {
                order.push(FocusTarget::RemoveEntry(key));
            }
        }
        if session.can_append(content_type) {
            order.push(FocusTarget::AddEntry);
        }
    }

    order.push(FocusTarget::Submit);
    order
}

/// Current focus plus the position it was last seen at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormFocus {
    target: FocusTarget,
    last_index: usize,
}

impl Default for FormFocus {
    fn default() -> Self {
        Self {
            target: FocusTarget::Base(BaseField::ContentType),
            last_index: 0,
        }
    }
}

impl FormFocus {
    pub fn target(&self) -> FocusTarget {
        self.target
    }

    pub fn is_focused(&self, target: &FocusTarget) -> bool {
        &self.target == target
    }

    pub fn focus(&mut self, session: &FormSession, target: FocusTarget) {
        let order = focus_order(session);
        if let Some(index) = order.iter().position(|t| *t == target) {
            self.target = target;
            self.last_index = index;
        }
    }

    pub fn next(&mut self, session: &FormSession) {
        let order = focus_order(session);
        let current = self.index_in(&order);
        self.set(&order, (current + 1) % order.len());
    }

    pub fn prev(&mut self, session: &FormSession) {
        let order = focus_order(session);
        let current = self.index_in(&order);
        let index = if current == 0 {
            order.len() - 1
        } else {
            current - 1
        };
        self.set(&order, index);
    }

    /// Re-anchor after the set of targets changed (entry removed, cap reached,
    /// content type switched). Keeps the target if it still exists, otherwise
    /// takes whatever now sits at the old position.
    pub fn settle(&mut self, session: &FormSession) {
        let order = focus_order(session);
        match order.iter().position(|t| *t == self.target) {
            Some(index) => self.last_index = index,
            None => {
                let index = self.last_index.min(order.len() - 1);
                self.set(&order, index);
            }
        }
    }

    fn index_in(&self, order: &[FocusTarget]) -> usize {
        order
            .iter()
            .position(|t| *t == self.target)
            .unwrap_or_else(|| self.last_index.min(order.len() - 1))
    }

    fn set(&mut self, order: &[FocusTarget], index: usize) {
        self.target = order[index];
        self.last_index = index;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::forms::options::ContentType;

    #[test]
    fn test_default_order_for_blog_post() {
        let session = FormSession::default();
        let key = session.entry_keys(ContentType::BlogPost)[0];
        assert_eq!(
            focus_order(&session),
            vec![
                FocusTarget::Base(BaseField::ContentType),
                FocusTarget::Base(BaseField::Title),
                FocusTarget::Base(BaseField::Author),
                FocusTarget::EntryField {
                    key,
                    field: "blogPostBody"
                },
                FocusTarget::EntryField {
                    key,
                    field: "blogPostTags"
                },
                FocusTarget::AddEntry,
                FocusTarget::Submit,
            ]
        );
    }

    #[test]
    fn test_remove_buttons_appear_with_two_entries() {
        let mut session = FormSession::default();
        session.append_entry(ContentType::BlogPost);
        let removes = focus_order(&session)
            .into_iter()
            .filter(|t| matches!(t, FocusTarget::RemoveEntry(_)))
            .count();
        assert_eq!(removes, 2);
    }

    #[test]
    fn test_add_button_hidden_at_cap() {
        let mut session = FormSession::default();
        for _ in 0..4 {
            session.append_entry(ContentType::BlogPost);
        }
        assert!(!focus_order(&session).contains(&FocusTarget::AddEntry));
    }

    #[test]
    fn test_unknown_type_has_no_entry_targets() {
        let mut session = FormSession::default();
        session.set_content_type("Podcast");
        assert_eq!(focus_order(&session).len(), 4);
    }

    #[test]
    fn test_next_and_prev_wrap() {
        let session = FormSession::default();
        let mut focus = FormFocus::default();
        focus.prev(&session);
        assert_eq!(focus.target(), FocusTarget::Submit);
        focus.next(&session);
        assert_eq!(focus.target(), FocusTarget::Base(BaseField::ContentType));
    }

    #[test]
    fn test_focus_survives_removal_of_earlier_entry() {
        let mut session = FormSession::default();
        let first = session.entry_keys(ContentType::BlogPost)[0];
        let second = session.append_entry(ContentType::BlogPost).unwrap();
        let mut focus = FormFocus::default();
        let target = FocusTarget::EntryField {
            key: second,
            field: "blogPostTags",
        };
        focus.focus(&session, target);

        session.remove_entry(ContentType::BlogPost, first);
        focus.settle(&session);

        assert_eq!(focus.target(), target);
    }

    #[test]
    fn test_settle_moves_off_removed_entry() {
        let mut session = FormSession::default();
        let first = session.entry_keys(ContentType::BlogPost)[0];
        session.append_entry(ContentType::BlogPost);
        let mut focus = FormFocus::default();
        focus.focus(&session, FocusTarget::RemoveEntry(first));

        session.remove_entry(ContentType::BlogPost, first);
        focus.settle(&session);

        assert!(focus.target().entry_key() != Some(first));
        assert!(focus_order(&session).contains(&focus.target()));
    }

    #[test]
    fn test_focus_ignores_unknown_target() {
        let session = FormSession::default();
        let mut focus = FormFocus::default();
        focus.focus(&session, FocusTarget::RemoveEntry(EntryKey::new()));
        assert_eq!(focus.target(), FocusTarget::Base(BaseField::ContentType));
    }
}
