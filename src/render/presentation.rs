use crate::widget::classifier::Department;

pub const DEFAULT_COLOR: &str = "#6b7280";
pub const DEFAULT_ICON: &str = "💬";

pub fn department_color(department: Option<Department>) -> &'static str {
    match department {
        Some(Department::Orders) => "#3b82f6",
        Some(Department::Returns) => "#f59e0b",
        Some(Department::Products) => "#10b981",
        Some(Department::Billing) => "#8b5cf6",
        Some(Department::Technical) => "#ef4444",
        Some(Department::General) => "#06b6d4",
        None => DEFAULT_COLOR,
    }
}

pub fn department_icon(department: Option<Department>) -> &'static str {
    match department {
        Some(Department::Orders) => "📦",
        Some(Department::Returns) => "↩️",
        Some(Department::Products) => "🛍️",
        Some(Department::Billing) => "💳",
        Some(Department::Technical) => "🔧",
        Some(Department::General) => "🎧",
        None => DEFAULT_ICON,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_department_uses_defaults() {
        assert_eq!(department_color(None), DEFAULT_COLOR);
        assert_eq!(department_icon(None), DEFAULT_ICON);
        assert_eq!(department_color(Some(Department::Orders)), "#3b82f6");
        assert_eq!(department_icon(Some(Department::Billing)), "💳");
    }
}
