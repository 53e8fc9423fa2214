//! The fixed category taxonomy and the keyword table that drives classification.
//!
//! Category names are a contract surface: storage, UI and analytics all key on
//! the exact strings returned by [`Category::as_str`].

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Transaction categories, declared in classifier table order.
///
/// `Ord` follows declaration order, so `BTreeMap<Category, _>` iterates the
/// same way the classifier does.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Income,
    Transfer,
    Subscriptions,
    Rent,
    Utilities,
    Healthcare,
    Education,
    Travel,
    Transport,
    Groceries,
    Food,
    Shopping,
    Gifts,
}

/// Direction of money movement
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
    Transfer,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
            TransactionType::Transfer => "transfer",
        }
    }
}

/// One row of the keyword table.
#[derive(Debug, Clone, Copy)]
pub struct CategoryRule {
    pub category: Category,
    /// Lowercase substrings; each one present in the text counts as a match.
    pub keywords: &'static [&'static str],
    pub txn_type: TransactionType,
    pub affects_budget: bool,
}

const fn expense(category: Category, keywords: &'static [&'static str]) -> CategoryRule {
    CategoryRule {
        category,
        keywords,
        txn_type: TransactionType::Expense,
        affects_budget: true,
    }
}

/// Keyword table, iterated in this exact order. Earlier rows win ties.
pub static CATEGORY_RULES: [CategoryRule; 13] = [
    CategoryRule {
        category: Category::Income,
        keywords: &[
            "salary", "credited", "received", "refund", "cashback", "interest", "dividend",
            "bonus", "payroll", "stipend",
        ],
        txn_type: TransactionType::Income,
        affects_budget: false,
    },
    CategoryRule {
        category: Category::Transfer,
        keywords: &[
            "transfer", "transferred", "neft", "imps", "rtgs", "sent to", "fund transfer",
            "self transfer",
        ],
        txn_type: TransactionType::Transfer,
        affects_budget: false,
    },
    expense(
        Category::Subscriptions,
        &[
            "netflix", "spotify", "prime", "hotstar", "youtube", "subscription", "renewal",
            "membership", "apple.com", "icloud",
        ],
    ),
    expense(
        Category::Rent,
        &[
            "house rent", "rent paid", "rent payment", "monthly rent", "rental", "landlord",
            "lease rent", "maintenance", "society",
        ],
    ),
    expense(
        Category::Utilities,
        &[
            "electricity", "water bill", "gas bill", "broadband", "internet", "recharge",
            "mobile bill", "bescom", "airtel", "jio", "dth recharge", "tata play", "wifi",
        ],
    ),
    expense(
        Category::Healthcare,
        &[
            "hospital", "pharmacy", "medical", "clinic", "doctor", "apollo", "medicine",
            "health", "lab test", "diagnostic",
        ],
    ),
    expense(
        Category::Education,
        &[
            "school", "college", "tuition", "course", "university", "udemy", "coursera",
            "books", "exam fee", "education",
        ],
    ),
    expense(
        Category::Travel,
        &[
            "flight", "airline", "indigo", "makemytrip", "irctc", "hotel", "booking.com",
            "goibibo", "airbnb", "travel",
        ],
    ),
    expense(
        Category::Transport,
        &[
            "uber", "ola cabs", "olacabs", "rapido", "metro", "fuel", "petrol", "diesel", "parking",
            "toll plaza", "fastag", "cab ride", "cab fare",
        ],
    ),
    expense(
        Category::Groceries,
        &[
            "grocery", "groceries", "bigbasket", "blinkit", "zepto", "dmart", "supermarket",
            "vegetables", "kirana", "instamart",
        ],
    ),
    expense(
        Category::Food,
        &[
            "swiggy", "zomato", "restaurant", "cafe", "dinner", "lunch", "breakfast", "pizza",
            "burger", "starbucks", "dominos", "food",
        ],
    ),
    expense(
        Category::Shopping,
        &[
            "amazon", "flipkart", "myntra", "ajio", "shopping", "store", "purchase",
            "nykaa", "meesho",
        ],
    ),
    expense(
        Category::Gifts,
        &["gift", "donation", "charity", "wedding", "birthday"],
    ),
];

impl Category {
    /// Every category in table order
    pub fn all() -> impl Iterator<Item = Category> {
        CATEGORY_RULES.iter().map(|r| r.category)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Income => "Income",
            Category::Transfer => "Transfer",
            Category::Subscriptions => "Subscriptions",
            Category::Rent => "Rent",
            Category::Utilities => "Utilities",
            Category::Healthcare => "Healthcare",
            Category::Education => "Education",
            Category::Travel => "Travel",
            Category::Transport => "Transport",
            Category::Groceries => "Groceries",
            Category::Food => "Food",
            Category::Shopping => "Shopping",
            Category::Gifts => "Gifts",
        }
    }

    /// The table row for this category
    pub fn rule(&self) -> &'static CategoryRule {
        // Table rows are declared in enum order.
        &CATEGORY_RULES[*self as usize]
    }

    pub fn txn_type(&self) -> TransactionType {
        self.rule().txn_type
    }

    /// Whether spend in this category counts against a monthly budget
    pub fn affects_budget(&self) -> bool {
        self.rule().affects_budget
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = anyhow::Error;

    /// Case-insensitive lookup by category name.
    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        match Category::all().find(|c| c.as_str().eq_ignore_ascii_case(wanted)) {
            Some(c) => Ok(c),
            None => bail!("unknown category: {wanted:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_order_matches_enum() {
        for (i, rule) in CATEGORY_RULES.iter().enumerate() {
            assert_eq!(rule.category as usize, i, "{} out of order", rule.category);
        }
        assert_eq!(Category::all().count(), 13);
    }

    #[test]
    fn test_keywords_are_lowercase() {
        for rule in &CATEGORY_RULES {
            for kw in rule.keywords {
                assert_eq!(*kw, kw.to_lowercase(), "keyword {kw:?} in {}", rule.category);
            }
        }
    }

    #[test]
    fn test_budget_flags() {
        assert!(!Category::Income.affects_budget());
        assert!(!Category::Transfer.affects_budget());
        assert!(Category::Food.affects_budget());
        assert_eq!(Category::Income.txn_type(), TransactionType::Income);
        assert_eq!(Category::Transfer.txn_type(), TransactionType::Transfer);
        assert_eq!(Category::Rent.txn_type(), TransactionType::Expense);
    }

    #[test]
    fn test_from_str_round_trip() {
        for c in Category::all() {
            assert_eq!(c.as_str().parse::<Category>().unwrap(), c);
        }
        assert_eq!("groceries".parse::<Category>().unwrap(), Category::Groceries);
        assert!("Crypto".parse::<Category>().is_err());
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&Category::Subscriptions).unwrap();
        assert_eq!(json, "\"Subscriptions\"");
        let json = serde_json::to_string(&TransactionType::Expense).unwrap();
        assert_eq!(json, "\"expense\"");
    }

    #[test]
    fn test_keywords_do_not_hide_in_common_words() {
        let words = [
            "current", "parent", "different", "please", "release", "cola", "cable", "bandwidth",
            "small", "toll free",
        ];
        for rule in &CATEGORY_RULES {
            for kw in rule.keywords {
                for word in words {
                    assert!(!word.contains(kw), "{kw:?} ({}) matches inside {word:?}", rule.category);
                }
            }
        }
    }
}
