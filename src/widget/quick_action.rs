use serde::{Deserialize, Serialize};

/// Pre-filled submissions offered as one-click buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuickAction {
    OrderStatus,
    Tracking,
    Returns,
    ProductInfo,
    Billing,
    Technical,
}

impl QuickAction {
    pub const ALL: [QuickAction; 6] = [
        QuickAction::OrderStatus,
        QuickAction::Tracking,
        QuickAction::Returns,
        QuickAction::ProductInfo,
        QuickAction::Billing,
        QuickAction::Technical,
    ];

    pub fn text(&self) -> &'static str {
        match self {
            QuickAction::OrderStatus => "What's the status of my order?",
            QuickAction::Tracking => "I need to track my shipment",
            QuickAction::Returns => "I want to return an item",
            QuickAction::ProductInfo => "Can you give me product information?",
            QuickAction::Billing => "I have a question about billing",
            QuickAction::Technical => "I need technical support",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            QuickAction::OrderStatus => "Order Status",
            QuickAction::Tracking => "Track Package",
            QuickAction::Returns => "Returns",
            QuickAction::ProductInfo => "Product Info",
            QuickAction::Billing => "Billing",
            QuickAction::Technical => "Tech Support",
        }
    }

    /// Zero-based slot, used for F1..F6 in the terminal.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::classifier::{categorize, Category};

    #[test]
    fn test_quick_actions_route_to_their_department() {
        let expected = [
            Category::Orders,
            Category::Orders,
            Category::Returns,
            Category::Products,
            Category::Billing,
            Category::Technical,
        ];
        for (action, category) in QuickAction::ALL.iter().zip(expected) {
            assert_eq!(categorize(action.text()), category, "{:?}", action);
        }
        assert_eq!(QuickAction::from_index(6), None);
    }
}
