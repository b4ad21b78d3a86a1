//! Pharmacy inventory: stock cards with low-stock and predicted-shortage flags.

use aethelgard_contracts::inventory::InventoryItem;

use crate::mock_data;

pub struct InventoryView {
    items: Vec<InventoryItem>,
}

impl InventoryView {
    pub fn new() -> Self {
        Self {
            items: mock_data::inventory(),
        }
    }

    pub fn items(&self) -> &[InventoryItem] {
        &self.items
    }

    pub fn low_stock(&self) -> Vec<&InventoryItem> {
        self.items.iter().filter(|i| i.is_low_stock()).collect()
    }

    pub fn predicted_shortages(&self) -> Vec<&InventoryItem> {
        self.items.iter().filter(|i| i.is_predicted_shortage()).collect()
    }

    /// Items that need a card alert, paired with the alert text.
    pub fn alerts(&self) -> Vec<(&InventoryItem, &'static str)> {
        self.items
            .iter()
            .filter_map(|i| i.alert().map(|text| (i, text)))
            .collect()
    }
}

impl Default for InventoryView {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn low_stock_flags_only_surgical_gloves() {
        let view = InventoryView::new();
        let flagged: Vec<&str> = view.low_stock().iter().map(|i| i.name.as_str()).collect();
        assert_eq!(flagged, ["Surgical Gloves (L)"]);
    }

    #[test]
    fn every_mock_item_is_short_against_forecast() {
        let view = InventoryView::new();
        assert_eq!(view.predicted_shortages().len(), 3);
    }

    #[test]
    fn alerts_prefer_threshold_message() {
        let view = InventoryView::new();
        let alerts: Vec<(&str, &str)> = view
            .alerts()
            .into_iter()
            .map(|(item, text)| (item.sku.as_str(), text))
            .collect();
        assert_eq!(
            alerts,
            [
                ("PH-AMX-500", "AI predicts upcoming shortage based on disease trends."),
                ("PH-MET-850", "AI predicts upcoming shortage based on disease trends."),
                ("EQ-GLV-L", "Below safety threshold."),
            ]
        );
    }
}
