// src/widget/classifier.rs
//! Keyword classifier that picks the canned reply for a user message.
//!
//! Rules are evaluated top to bottom and the first match wins, so a message
//! that mentions both a refund and a login problem is routed to returns.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use super::replies;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Department {
    Orders,
    Returns,
    Products,
    Billing,
    Technical,
    General,
}

impl Department {
    pub fn as_str(&self) -> &'static str {
        match self {
            Department::Orders => "orders",
            Department::Returns => "returns",
            Department::Products => "products",
            Department::Billing => "billing",
            Department::Technical => "technical",
            Department::General => "general",
        }
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Orders,
    Returns,
    Products,
    Billing,
    Technical,
    Greeting,
    Gratitude,
    Fallback,
}

impl Category {
    pub fn department(&self) -> Option<Department> {
        match self {
            Category::Orders => Some(Department::Orders),
            Category::Returns => Some(Department::Returns),
            Category::Products => Some(Department::Products),
            Category::Billing => Some(Department::Billing),
            Category::Technical => Some(Department::Technical),
            Category::Greeting | Category::Gratitude | Category::Fallback => None,
        }
    }

    pub fn agent_name(&self) -> &'static str {
        match self {
            Category::Orders => "Sarah Chen",
            Category::Returns => "Marcus Johnson",
            Category::Products => "Emily Rodriguez",
            Category::Billing => "David Kim",
            Category::Technical => "Alex Thompson",
            Category::Greeting | Category::Gratitude | Category::Fallback => "Support Team",
        }
    }
}

/// Keywords are tested by substring containment on the lowercased input.
struct Rule {
    keywords: &'static [&'static str],
    category: Category,
}

const RULES: &[Rule] = &[
    Rule {
        keywords: &["order", "status", "track", "shipment", "delivery"],
        category: Category::Orders,
    },
    Rule {
        keywords: &["return", "exchange", "refund"],
        category: Category::Returns,
    },
    Rule {
        keywords: &[
            "product", "laptop", "phone", "tablet", "headphone", "camera", "watch", "tv", "samsung",
            "apple", "sony",
        ],
        category: Category::Products,
    },
    Rule {
        keywords: &["billing", "payment", "charge", "invoice"],
        category: Category::Billing,
    },
    Rule {
        keywords: &["technical", "app", "login", "password", "error"],
        category: Category::Technical,
    },
    Rule {
        keywords: &["hello", "hi", "hey", "help"],
        category: Category::Greeting,
    },
    Rule {
        keywords: &["thank", "appreciate"],
        category: Category::Gratitude,
    },
];

/// Category for a message, by first matching rule.
pub fn categorize(text: &str) -> Category {
    let lowered = text.to_lowercase();
    RULES
        .iter()
        .find(|rule| rule.keywords.iter().any(|k| lowered.contains(k)))
        .map(|rule| rule.category)
        .unwrap_or(Category::Fallback)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    pub category: Category,
    pub agent_name: String,
    pub department: Option<Department>,
    pub reply: String,
}

/// Pick the agent, department and reply text for `text`. Pure and deterministic.
pub fn classify(text: &str, user_name: &str) -> Response {
    let category = categorize(text);
    debug!("classified {:?} as {:?}", text, category);
    Response {
        category,
        agent_name: category.agent_name().to_string(),
        department: category.department(),
        reply: replies::reply_for(category, user_name),
    }
}
