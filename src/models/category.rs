//! Default spending categories offered to new users.

use serde::Serialize;

/// A parent category and its sub-categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Category {
    pub name: &'static str,
    pub children: &'static [&'static str],
}

const fn standalone(name: &'static str) -> Category {
    Category { name, children: &[] }
}

/// The default category tree, in display order.
pub const DEFAULT_CATEGORIES: &[Category] = &[
    standalone("Travel"),
    standalone("Car Payment"),
    standalone("Credit Card Payment"),
    standalone("Shopping"),
    standalone("Kratom"),
    standalone("Restaurants"),
    standalone("Groceries"),
    standalone("Personal Care"),
    standalone("Hobbies"),
    standalone("Cell Phone"),
    standalone("Gas & Fuel"),
    standalone("Convenience Stores"),
    standalone("Food Delivery"),
    standalone("Internet"),
    standalone("Income Tax"),
    standalone("Adult Entertainment"),
    standalone("Miscellaneous"),
    standalone("Home Improvement"),
    standalone("Pets"),
    standalone("Auto Maintenance"),
    standalone("Interest"),
    Category {
        name: "Mortgage",
        children: &["Property Taxes"],
    },
    Category {
        name: "Utilities",
        children: &["Electricity", "Gas", "Water"],
    },
    Category {
        name: "Insurance",
        children: &["Vehicle", "Home Owners", "Renters"],
    },
    Category {
        name: "Health & Wellness",
        children: &[
            "Massage",
            "Doctor",
            "Therapy",
            "Eyecare",
            "Pharmacy",
            "Prescriptions",
        ],
    },
    Category {
        name: "Auto",
        children: &["Repairs & Maintenance", "Parking"],
    },
    Category {
        name: "Subscriptions",
        children: &["Apps", "Streaming Services"],
    },
];

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::DEFAULT_CATEGORIES;

    #[test]
    fn parent_names_are_unique() {
        let names: HashSet<_> = DEFAULT_CATEGORIES.iter().map(|c| c.name).collect();

        assert_eq!(names.len(), DEFAULT_CATEGORIES.len());
    }

    #[test]
    fn tree_has_expected_shape() {
        let with_children = DEFAULT_CATEGORIES
            .iter()
            .filter(|c| !c.children.is_empty())
            .count();

        assert_eq!(DEFAULT_CATEGORIES.len(), 27);
        assert_eq!(with_children, 6);
    }
}
