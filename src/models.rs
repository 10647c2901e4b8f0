#[derive(Debug, Clone, PartialEq)]
pub struct Expense {
    pub id: i64,
    pub date: String,
    pub category: String,
    pub description: String,
    pub amount: f64,
}

/// A validated expense ready to be inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    pub date: String,
    pub category: String,
    pub description: String,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i64,
    pub username: String,
}

/// One row of the per-category aggregation.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    pub category: String,
    pub total: f64,
    pub count: i64,
}
