//! Department directory.

pub struct Department {
    pub code: &'static str,
    pub name: &'static str,
}

pub const DEPARTMENTS: [Department; 11] = [
    Department { code: "BAS", name: "Business & Administration Services" },
    Department { code: "PD", name: "Product Development" },
    Department { code: "CFC", name: "Corporate Finance Controller" },
    Department { code: "SS", name: "Strategic Sourcing" },
    Department { code: "ACC", name: "Accounting" },
    Department { code: "HR", name: "Human Resources" },
    Department { code: "BID", name: "Business & Innovation Development" },
    Department { code: "TEP", name: "Tour and Event Planning" },
    Department { code: "GA", name: "General Affairs" },
    Department { code: "ACS", name: "Art & Creative Support" },
    Department { code: "SO", name: "Sales Operation" },
];

/// Display name for a department code, or the code itself when unlisted.
pub fn department_name(code: &str) -> &str {
    DEPARTMENTS
        .iter()
        .find(|d| d.code == code)
        .map_or(code, |d| d.name)
}
