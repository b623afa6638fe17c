use weighbridge_types::{RequiredField, TransactionType};

/// Operator-entered transaction details
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionForm {
    pub transaction_type: TransactionType,
    pub vehicle_registration: String,
    pub customer_id: String,
    pub product: Option<String>,
    pub driver_name: Option<String>,
    pub haulier_name: Option<String>,
    pub notes: Option<String>,
}

impl TransactionForm {
    /// Required text fields that are empty or whitespace-only
    pub fn missing_fields(&self) -> Vec<RequiredField> {
        let mut missing = Vec::new();
        if self.vehicle_registration.trim().is_empty() {
            missing.push(RequiredField::VehicleRegistration);
        }
        if self.customer_id.trim().is_empty() {
            missing.push(RequiredField::Customer);
        }
        missing
    }
}

/// Blank optional inputs are stored as absent
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_on_default_form() {
        let form = TransactionForm::default();
        assert_eq!(
            form.missing_fields(),
            vec![RequiredField::VehicleRegistration, RequiredField::Customer]
        );
    }

    #[test]
    fn test_whitespace_counts_as_missing() {
        let form = TransactionForm {
            vehicle_registration: "   ".to_string(),
            customer_id: "acme".to_string(),
            ..Default::default()
        };
        assert_eq!(form.missing_fields(), vec![RequiredField::VehicleRegistration]);
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(Some("  ".to_string())), None);
        assert_eq!(non_blank(Some(" Dave ".to_string())), Some("Dave".to_string()));
        assert_eq!(non_blank(None), None);
    }
}
