//! Change markers and the routines that produce them.
//!
//! Every compared field ends up as a [`TrackedProperty`]. Scalars become
//! `Unchanged`/`Changed`, list members become `Added`/`Deleted`, and list
//! members with a stable id whose content differs become `ContentChanged`
//! wrapping a nested change record.

use std::collections::BTreeMap;

use serde::Serialize;

use rsc_types::{Identified, Risk};

/// Result of comparing one field or list member.
///
/// `T` is the compared value; `C` is the nested change record carried by
/// `ContentChanged` for composite values.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TrackedProperty<T, C = ()> {
    Unchanged {
        value: T,
    },
    #[serde(rename_all = "camelCase")]
    Added {
        new_value: T,
    },
    #[serde(rename_all = "camelCase")]
    Deleted {
        old_value: T,
    },
    #[serde(rename_all = "camelCase")]
    Changed {
        old_value: T,
        new_value: T,
    },
    ContentChanged {
        value: C,
    },
}

impl<T, C> TrackedProperty<T, C> {
    pub fn is_unchanged(&self) -> bool {
        matches!(self, Self::Unchanged { .. })
    }

    /// Returns `true` for every variant except `Unchanged`.
    pub fn is_change(&self) -> bool {
        !self.is_unchanged()
    }

    pub fn is_added(&self) -> bool {
        matches!(self, Self::Added { .. })
    }

    pub fn is_deleted(&self) -> bool {
        matches!(self, Self::Deleted { .. })
    }

    pub fn is_content_changed(&self) -> bool {
        matches!(self, Self::ContentChanged { .. })
    }
}

/// Whether an unchanged scalar is reported or left out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScalarPolicy {
    /// Emit `Unchanged` for equal values.
    AlwaysEmit,
    /// Emit nothing for equal values.
    OmitUnchanged,
}

/// Compare two scalars, always producing a marker.
pub fn track<T: PartialEq + Clone>(old: &T, new: &T) -> TrackedProperty<T> {
    if old == new {
        TrackedProperty::Unchanged { value: new.clone() }
    } else {
        TrackedProperty::Changed {
            old_value: old.clone(),
            new_value: new.clone(),
        }
    }
}

/// Compare two scalars under `policy`.
pub fn compare_scalar<T: PartialEq + Clone>(
    old: &T,
    new: &T,
    policy: ScalarPolicy,
) -> Option<TrackedProperty<T>> {
    match track(old, new) {
        unchanged @ TrackedProperty::Unchanged { .. } => match policy {
            ScalarPolicy::AlwaysEmit => Some(unchanged),
            ScalarPolicy::OmitUnchanged => None,
        },
        changed => Some(changed),
    }
}

/// Compare two lists of values that have no identity key.
///
/// Membership only: values missing from `new` are `Deleted`, values missing
/// from `old` are `Added`, and values in both produce nothing. Deletions come
/// first, each group in source order, and repeated values are reported once.
pub fn diff_values<T: PartialEq + Clone>(old: &[T], new: &[T]) -> Vec<TrackedProperty<T>> {
    let mut changes: Vec<TrackedProperty<T>> = Vec::new();
    let mut reported: Vec<&T> = Vec::new();

    for value in old {
        if !new.contains(value) && !reported.contains(&value) {
            reported.push(value);
            changes.push(TrackedProperty::Deleted {
                old_value: value.clone(),
            });
        }
    }
    for value in new {
        if !old.contains(value) && !reported.contains(&value) {
            reported.push(value);
            changes.push(TrackedProperty::Added {
                new_value: value.clone(),
            });
        }
    }
    changes
}

/// Compare two lists whose members carry a stable id.
///
/// Members are matched by [`Identified::id`], never by position. An id only
/// in `old` yields `Deleted`, an id only in `new` yields `Added`, and an id in
/// both whose members differ yields `ContentChanged` with the record built by
/// `diff_content(old, new)`. Equal members yield nothing. The result holds all
/// deletions, then all content changes, then all additions. If an id repeats
/// within one list, only its first member takes part.
pub fn diff_keyed<T, C, F>(old: &[T], new: &[T], diff_content: F) -> Vec<TrackedProperty<T, C>>
where
    T: Identified + PartialEq + Clone,
    F: Fn(&T, &T) -> C,
{
    let old_by_id = index_by_id(old);
    let new_by_id = index_by_id(new);

    let deleted = first_occurrences(old, &old_by_id)
        .filter(|item| !new_by_id.contains_key(item.id()))
        .map(|item| TrackedProperty::Deleted {
            old_value: item.clone(),
        });

    let mut changed: Vec<TrackedProperty<T, C>> = Vec::new();
    let mut added: Vec<TrackedProperty<T, C>> = Vec::new();
    for item in first_occurrences(new, &new_by_id) {
        match old_by_id.get(item.id()) {
            None => added.push(TrackedProperty::Added {
                new_value: item.clone(),
            }),
            Some(previous) if *previous != item => changed.push(TrackedProperty::ContentChanged {
                value: diff_content(*previous, item),
            }),
            Some(_) => {}
        }
    }

    deleted.chain(changed).chain(added).collect()
}

fn index_by_id<T: Identified>(items: &[T]) -> BTreeMap<&str, &T> {
    let mut index = BTreeMap::new();
    for item in items {
        index.entry(item.id()).or_insert(item);
    }
    index
}

fn first_occurrences<'a, T: Identified>(
    items: &'a [T],
    index: &'a BTreeMap<&'a str, &'a T>,
) -> impl Iterator<Item = &'a T> + 'a {
    items
        .iter()
        .filter(move |item| index.get(item.id()).is_some_and(|first| std::ptr::eq(*first, *item)))
}

/// Nested change record of a risk estimate.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskChange {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<TrackedProperty<Option<String>>>,
    pub probability: TrackedProperty<f64>,
    pub consequence: TrackedProperty<f64>,
}

/// Compare two risk estimates.
///
/// Always a `ContentChanged` node: probability and consequence are always
/// reported, the summary only when it changed.
pub fn diff_risk(old: &Risk, new: &Risk) -> TrackedProperty<Risk, RiskChange> {
    TrackedProperty::ContentChanged {
        value: RiskChange {
            summary: compare_scalar(&old.summary, &new.summary, ScalarPolicy::OmitUnchanged),
            probability: track(&old.probability, &new.probability),
            consequence: track(&old.consequence, &new.consequence),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Clone, Debug, PartialEq)]
    struct Item {
        id: &'static str,
        label: &'static str,
    }

    impl Identified for Item {
        fn id(&self) -> &str {
            self.id
        }
    }

    fn item(id: &'static str, label: &'static str) -> Item {
        Item { id, label }
    }

    fn label_change(old: &Item, new: &Item) -> (String, TrackedProperty<&'static str>) {
        (new.id.to_string(), track(&old.label, &new.label))
    }

    #[test]
    fn scalar_policies() {
        assert_eq!(
            compare_scalar(&1, &1, ScalarPolicy::AlwaysEmit),
            Some(TrackedProperty::Unchanged { value: 1 })
        );
        assert_eq!(compare_scalar(&1, &1, ScalarPolicy::OmitUnchanged), None);
        for policy in [ScalarPolicy::AlwaysEmit, ScalarPolicy::OmitUnchanged] {
            assert_eq!(
                compare_scalar(&1, &2, policy),
                Some(TrackedProperty::Changed {
                    old_value: 1,
                    new_value: 2
                })
            );
        }
    }

    #[test]
    fn value_list_reports_membership_only() {
        let changes = diff_values(&["a", "b", "c"], &["c", "d", "a"]);
        assert_eq!(
            changes,
            vec![
                TrackedProperty::Deleted { old_value: "b" },
                TrackedProperty::Added { new_value: "d" },
            ]
        );
        assert!(changes.iter().all(TrackedProperty::is_change));
    }

    #[test]
    fn value_list_repeats_are_reported_once() {
        let changes = diff_values(&["x", "x"], &["y", "y"]);
        assert_eq!(changes.len(), 2);
    }

    #[test]
    fn value_list_reordering_is_not_a_change() {
        assert!(diff_values(&[1, 2, 3], &[3, 2, 1]).is_empty());
    }

    #[test]
    fn keyed_list_matches_by_id() {
        let old = vec![item("a", "alpha"), item("b", "beta")];
        let new = vec![item("b", "beta v2"), item("c", "gamma")];

        let changes = diff_keyed(&old, &new, label_change);
        assert_eq!(changes.len(), 3);
        assert_eq!(
            changes[0],
            TrackedProperty::Deleted {
                old_value: item("a", "alpha")
            }
        );
        assert_eq!(
            changes[1],
            TrackedProperty::ContentChanged {
                value: (
                    "b".to_string(),
                    TrackedProperty::Changed {
                        old_value: "beta",
                        new_value: "beta v2"
                    }
                )
            }
        );
        assert_eq!(
            changes[2],
            TrackedProperty::Added {
                new_value: item("c", "gamma")
            }
        );
    }

    #[test]
    fn keyed_list_ignores_position_and_equal_members() {
        let old = vec![item("a", "alpha"), item("b", "beta")];
        let new = vec![item("b", "beta"), item("a", "alpha")];
        assert!(diff_keyed(&old, &new, label_change).is_empty());
    }

    #[test]
    fn keyed_list_groups_deletions_changes_additions() {
        let old = vec![item("d1", "x"), item("m1", "x"), item("d2", "x"), item("m2", "x")];
        let new = vec![item("n1", "x"), item("m2", "y"), item("n2", "x"), item("m1", "y")];

        let changes = diff_keyed(&old, &new, label_change);
        let kinds: Vec<&str> = changes
            .iter()
            .map(|c| match c {
                TrackedProperty::Deleted { old_value } => old_value.id,
                TrackedProperty::ContentChanged { value } => match value.0.as_str() {
                    "m1" => "m1",
                    _ => "m2",
                },
                TrackedProperty::Added { new_value } => new_value.id,
                other => panic!("unexpected {other:?}"),
            })
            .collect();
        assert_eq!(kinds, vec!["d1", "d2", "m2", "m1", "n1", "n2"]);
    }

    #[test]
    fn keyed_list_duplicate_ids_use_first_member() {
        let old = vec![item("a", "alpha"), item("a", "shadow")];
        let new = vec![item("a", "alpha")];
        assert!(diff_keyed(&old, &new, label_change).is_empty());
    }

    #[test]
    fn risk_is_always_content_changed() {
        let risk = Risk::new(0.1, 1000.0);
        let TrackedProperty::ContentChanged { value } = diff_risk(&risk, &risk) else {
            panic!("risk must be wrapped in ContentChanged");
        };
        assert!(value.summary.is_none());
        assert!(value.probability.is_unchanged());
        assert!(value.consequence.is_unchanged());
    }

    #[test]
    fn risk_summary_reported_only_when_changed() {
        let old = Risk::new(0.1, 1000.0);
        let mut new = old.clone();
        new.summary = Some("Reviewed".into());
        new.consequence = 8000.0;
        let TrackedProperty::ContentChanged { value } = diff_risk(&old, &new) else {
            panic!("risk must be wrapped in ContentChanged");
        };
        assert_eq!(
            value.summary,
            Some(TrackedProperty::Changed {
                old_value: None,
                new_value: Some("Reviewed".into())
            })
        );
        assert!(value.probability.is_unchanged());
        assert!(value.consequence.is_change());
    }

    #[test]
    fn serialized_form_is_tagged() {
        let changed: TrackedProperty<f64> = track(&1.0, &2.0);
        assert_eq!(
            serde_json::to_value(&changed).unwrap(),
            json!({"type": "CHANGED", "oldValue": 1.0, "newValue": 2.0})
        );
        let added: TrackedProperty<&str> = TrackedProperty::Added { new_value: "x" };
        assert_eq!(
            serde_json::to_value(&added).unwrap(),
            json!({"type": "ADDED", "newValue": "x"})
        );
        let unchanged: TrackedProperty<u8> = track(&3, &3);
        assert_eq!(
            serde_json::to_value(&unchanged).unwrap(),
            json!({"type": "UNCHANGED", "value": 3})
        );
    }
}
