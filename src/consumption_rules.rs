//! Linked-stock rules: buying one ticket category also draws down another.
//!
//! Rules are data. The orchestrator asks the table which category (if any) a
//! purchase drags along and never special-cases titles itself.

use std::num::NonZeroU32;
use thiserror::Error;

use crate::domain::{CategoryId, TicketCategory};

/// Buying a category titled `trigger_title` also consumes `ratio` tickets of
/// the category titled `linked_title` in the same event, per ticket bought.
/// A zero ratio cannot be expressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsumptionRule {
    pub trigger_title: String,
    pub linked_title: String,
    pub ratio: NonZeroU32,
}

impl ConsumptionRule {
    pub fn new(trigger_title: impl Into<String>, linked_title: impl Into<String>, ratio: NonZeroU32) -> Self {
        Self {
            trigger_title: trigger_title.into(),
            linked_title: linked_title.into(),
            ratio,
        }
    }
}

/// The resolved second reservation for one cart line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkedCategory {
    pub category_id: CategoryId,
    pub ratio: NonZeroU32,
}

impl LinkedCategory {
    /// Linked tickets needed for `quantity` purchased, `None` on overflow.
    /// Never zero for a non-zero `quantity`.
    pub fn quantity_for(&self, quantity: u32) -> Option<u32> {
        quantity.checked_mul(self.ratio.get())
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RuleError {
    #[error("category {category_id} requires a \"{linked_title}\" category in event {event_id}, none exists")]
    LinkedCategoryMissing {
        category_id: CategoryId,
        event_id: String,
        linked_title: String,
    },
    #[error("category {category_id} matches {} \"{linked_title}\" categories in event {event_id}: {}", .candidates.len(), .candidates.join(", "))]
    AmbiguousLinkedCategory {
        category_id: CategoryId,
        event_id: String,
        linked_title: String,
        candidates: Vec<CategoryId>,
    },
}

#[derive(Debug, Clone)]
pub struct ConsumptionRules {
    rules: Vec<ConsumptionRule>,
}

impl Default for ConsumptionRules {
    /// Community lodging holders also hold a general admission ticket.
    fn default() -> Self {
        Self::new(vec![ConsumptionRule::new("community lodging", "general", NonZeroU32::MIN)])
    }
}

impl ConsumptionRules {
    pub fn new(rules: Vec<ConsumptionRule>) -> Self {
        Self { rules }
    }

    /// Rule triggered by `title`; exact, case-sensitive match.
    pub fn rule_for(&self, title: &str) -> Option<&ConsumptionRule> {
        self.rules.iter().find(|rule| rule.trigger_title == title)
    }

    /// Resolves the category `purchased` draws down, searching `catalog`
    /// within the purchased category's event. Pure lookup.
    ///
    /// Exactly one category in the event may carry the linked title; zero or
    /// several is an error, so the result never depends on catalog order.
    pub fn linked_category(
        &self,
        purchased: &TicketCategory,
        catalog: &[TicketCategory],
    ) -> Result<Option<LinkedCategory>, RuleError> {
        let Some(rule) = self.rule_for(&purchased.title) else {
            return Ok(None);
        };

        let mut candidates: Vec<&TicketCategory> = catalog
            .iter()
            .filter(|candidate| candidate.event_id == purchased.event_id && candidate.id != purchased.id)
            .filter(|candidate| candidate.title == rule.linked_title)
            .collect();

        match candidates.len() {
            0 => Err(RuleError::LinkedCategoryMissing {
                category_id: purchased.id.clone(),
                event_id: purchased.event_id.clone(),
                linked_title: rule.linked_title.clone(),
            }),
            1 => Ok(Some(LinkedCategory {
                category_id: candidates[0].id.clone(),
                ratio: rule.ratio,
            })),
            _ => {
                candidates.sort_by(|a, b| a.id.cmp(&b.id));
                Err(RuleError::AmbiguousLinkedCategory {
                    category_id: purchased.id.clone(),
                    event_id: purchased.event_id.clone(),
                    linked_title: rule.linked_title.clone(),
                    candidates: candidates.into_iter().map(|linked| linked.id.clone()).collect(),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(id: &str, event_id: &str, title: &str) -> TicketCategory {
        TicketCategory {
            id: id.into(),
            event_id: event_id.into(),
            title: title.into(),
            price: 100,
            available_quantity: 5,
            capacity: 5,
        }
    }

    #[test]
    fn test_lodging_links_to_general_in_same_event() {
        let catalog = vec![
            category("category_1", "event_2", "general"),
            category("category_2", "event_1", "general"),
            category("category_3", "event_1", "community lodging"),
        ];
        let linked = ConsumptionRules::default()
            .linked_category(&catalog[2], &catalog)
            .unwrap();
        assert_eq!(linked, Some(LinkedCategory { category_id: "category_2".into(), ratio: NonZeroU32::MIN }));
    }

    #[test]
    fn test_unmatched_titles_have_no_link() {
        let catalog = vec![
            category("category_1", "event_1", "general"),
            category("category_2", "event_1", "Community Lodging"),
            category("category_3", "event_1", "vip"),
        ];
        let rules = ConsumptionRules::default();
        for purchased in &catalog {
            assert_eq!(rules.linked_category(purchased, &catalog), Ok(None));
        }
    }

    #[test]
    fn test_missing_linked_category_is_reported() {
        let catalog = vec![
            category("category_1", "event_2", "general"),
            category("category_2", "event_1", "community lodging"),
        ];
        assert_eq!(
            ConsumptionRules::default().linked_category(&catalog[1], &catalog),
            Err(RuleError::LinkedCategoryMissing {
                category_id: "category_2".into(),
                event_id: "event_1".into(),
                linked_title: "general".into(),
            })
        );
    }

    #[test]
    fn test_custom_ratio_scales_quantity() {
        let ratio = NonZeroU32::new(3).unwrap();
        let rules = ConsumptionRules::new(vec![ConsumptionRule::new("family pass", "general", ratio)]);
        let catalog = vec![
            category("category_1", "event_1", "general"),
            category("category_2", "event_1", "family pass"),
        ];
        let linked = rules.linked_category(&catalog[1], &catalog).unwrap().unwrap();
        assert_eq!(linked.quantity_for(2), Some(6));
        assert_eq!(linked.quantity_for(u32::MAX), None);
    }

    #[test]
    fn test_duplicate_linked_titles_are_ambiguous() {
        let catalog = vec![
            category("category_3", "event_1", "general"),
            category("category_1", "event_1", "general"),
            category("category_2", "event_1", "community lodging"),
            category("category_4", "event_2", "general"),
        ];
        let lodging = catalog[2].clone();
        let rules = ConsumptionRules::default();

        // Same answer whichever order the store hands the catalog back in.
        let mut reversed = catalog.clone();
        reversed.reverse();
        for catalog in [&catalog, &reversed] {
            assert_eq!(
                rules.linked_category(&lodging, catalog),
                Err(RuleError::AmbiguousLinkedCategory {
                    category_id: "category_2".into(),
                    event_id: "event_1".into(),
                    linked_title: "general".into(),
                    candidates: vec!["category_1".into(), "category_3".into()],
                })
            );
        }
    }

    #[test]
    fn test_minimum_ratio_always_links_at_least_one_ticket() {
        let catalog = vec![
            category("category_1", "event_1", "general"),
            category("category_2", "event_1", "community lodging"),
        ];
        let linked = ConsumptionRules::default().linked_category(&catalog[1], &catalog).unwrap().unwrap();
        for quantity in [1, 2, 7] {
            assert_eq!(linked.quantity_for(quantity), Some(quantity));
        }
    }
}
