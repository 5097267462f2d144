//! Translation of text criteria into a job store query.
//!
//! Each set criterion becomes a "contains" pattern on one column, criteria are
//! ANDed, and unset criteria do not appear in the query at all. Both sides of
//! every `LIKE` are lowercased with [`LOWER_FN`], so case folding covers all of
//! Unicode and not only ASCII.

/// Name of the SQL function, registered by the job store, that lowercases
/// text with Rust's Unicode rules.
pub const LOWER_FN: &str = "ulower";

/// Text columns of the job table that can be filtered on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobTextField {
    Title,
    Company,
    Location,
    Description,
}

impl JobTextField {
    pub fn column(self) -> &'static str {
        match self {
            JobTextField::Title => "title",
            JobTextField::Company => "company",
            JobTextField::Location => "location",
            JobTextField::Description => "description",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPattern {
    pub field: JobTextField,
    /// A `LIKE` pattern, `%value%` with `value` lowercased and its wildcards
    /// escaped.
    pub pattern: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobQuery {
    pub patterns: Vec<FieldPattern>,
}

const LIKE_ESCAPE: char = '\\';

fn contains_pattern(value: &str) -> String {
    let mut pattern = String::with_capacity(value.len() + 2);
    pattern.push('%');
    for c in value.chars() {
        if c == '%' || c == '_' || c == LIKE_ESCAPE {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Builds the store query for up to four optional criteria. Empty criteria
/// count as unset.
pub fn build_job_query(
    title: Option<&str>,
    company: Option<&str>,
    location: Option<&str>,
    description: Option<&str>,
) -> JobQuery {
    let patterns = [
        (JobTextField::Title, title),
        (JobTextField::Company, company),
        (JobTextField::Location, location),
        (JobTextField::Description, description),
    ]
    .into_iter()
    .filter_map(|(field, value)| {
        value.filter(|v| !v.is_empty()).map(|v| FieldPattern {
            field,
            pattern: contains_pattern(&v.to_lowercase()),
        })
    })
    .collect();

    JobQuery { patterns }
}

impl JobQuery {
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// The `WHERE` clause for this query with numbered placeholders, or an
    /// empty string when there is nothing to filter on.
    pub fn where_clause(&self) -> String {
        if self.patterns.is_empty() {
            return String::new();
        }
        let conditions = self
            .patterns
            .iter()
            .enumerate()
            .map(|(i, p)| {
                format!(
                    "{}({}) LIKE ?{} ESCAPE '\\'",
                    LOWER_FN,
                    p.field.column(),
                    i + 1
                )
            })
            .collect::<Vec<_>>()
            .join(" AND ");
        format!(" WHERE {}", conditions)
    }

    /// Bound values for the placeholders of `where_clause`, in order.
    pub fn params(&self) -> Vec<&str> {
        self.patterns.iter().map(|p| p.pattern.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn omits_unset_and_empty_criteria() {
        let query = build_job_query(None, Some(""), None, None);
        assert!(query.is_empty());
        assert_eq!(query.where_clause(), "");
        assert!(query.params().is_empty());
    }

    #[test]
    fn keeps_field_order_and_numbers_placeholders() {
        let query = build_job_query(Some("eng"), None, Some("NYC"), Some("rust"));
        assert_eq!(
            query.where_clause(),
            " WHERE ulower(title) LIKE ?1 ESCAPE '\\' AND ulower(location) LIKE ?2 ESCAPE '\\' AND ulower(description) LIKE ?3 ESCAPE '\\'"
        );
        assert_eq!(query.params(), vec!["%eng%", "%nyc%", "%rust%"]);
    }

    #[test]
    fn escapes_like_wildcards() {
        let query = build_job_query(None, Some("100%_co\\"), None, None);
        assert_eq!(query.patterns[0].field, JobTextField::Company);
        assert_eq!(query.params(), vec!["%100\\%\\_co\\\\%"]);
    }

    #[test]
    fn lowercases_non_ascii_criteria() {
        let query = build_job_query(Some("DÉVELOPPEUR"), None, Some("ÎLE"), None);
        assert_eq!(query.params(), vec!["%développeur%", "%île%"]);
    }
}
