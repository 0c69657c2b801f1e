use sqlx::{Postgres, QueryBuilder};
use uuid::Uuid;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 10;

pub const RECIPE_SUMMARY_COLUMNS: &str =
    "r.id, r.title, r.description, r.image_url, r.author_id, r.status, \
     r.total_time_minutes, r.created_at";

/// Filter criteria for the recipe listing. The same struct drives both the
/// count query and the data query so the two can never disagree.
#[derive(Debug, Clone, Default)]
pub struct RecipeFilter {
    pub meal_type: Option<String>,
    /// Conjunctive: a matching recipe must carry every listed tag.
    pub dietary_preferences: Vec<String>,
    pub max_total_time: Option<i32>,
    /// Present: list that author's recipes regardless of status.
    /// Absent: only approved recipes are visible.
    pub author_id: Option<Uuid>,
    pub search: Option<String>,
}

/// Appends the filter predicate to a builder whose SQL already ends in a
/// WHERE clause (callers start from `... WHERE 1=1`).
pub fn apply_filters(qb: &mut QueryBuilder<'_, Postgres>, filter: &RecipeFilter) {
    match filter.author_id {
        Some(author_id) => {
            qb.push(" AND r.author_id = ").push_bind(author_id);
        }
        None => {
            qb.push(" AND r.status = ").push_bind("approved");
        }
    }

    if let Some(meal_type) = &filter.meal_type {
        qb.push(
            " AND EXISTS (SELECT 1 FROM recipe_tags t WHERE t.recipe_id = r.id AND t.tag = ",
        )
        .push_bind(meal_type.clone())
        .push(")");
    }

    for preference in &filter.dietary_preferences {
        qb.push(
            " AND EXISTS (SELECT 1 FROM recipe_tags t WHERE t.recipe_id = r.id AND t.tag = ",
        )
        .push_bind(preference.clone())
        .push(")");
    }

    if let Some(max_total_time) = filter.max_total_time {
        qb.push(" AND r.total_time_minutes <= ").push_bind(max_total_time);
    }

    if let Some(search) = &filter.search {
        let pattern = format!("%{}%", search);
        qb.push(" AND (r.title ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR r.description ILIKE ")
            .push_bind(pattern)
            .push(")");
    }
}

pub fn count_query(filter: &RecipeFilter) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM recipes r WHERE 1=1");
    apply_filters(&mut qb, filter);
    qb
}

pub fn data_query(
    filter: &RecipeFilter,
    limit: i64,
    offset: i64,
) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(format!(
        "SELECT {RECIPE_SUMMARY_COLUMNS} FROM recipes r WHERE 1=1"
    ));
    apply_filters(&mut qb, filter);
    qb.push(" ORDER BY r.created_at DESC, r.id DESC LIMIT ")
        .push_bind(limit)
        .push(" OFFSET ")
        .push_bind(offset);
    qb
}

pub fn total_pages(total_recipes: i64, limit: i64) -> i64 {
    if limit <= 0 {
        return 0;
    }
    (total_recipes + limit - 1) / limit
}

/// Clamp raw pagination input to page >= 1, limit >= 1.
pub fn normalize_page(page: Option<i64>, limit: Option<i64>) -> (i64, i64) {
    let page = page.unwrap_or(DEFAULT_PAGE).max(1);
    let limit = limit.unwrap_or(DEFAULT_LIMIT).max(1);
    (page, limit)
}

/// Row offset for a 1-based page. Saturates instead of overflowing so an
/// absurd page number yields an empty page rather than a panic.
pub fn page_offset(page: i64, limit: i64) -> i64 {
    (page - 1).saturating_mul(limit)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter_all() -> RecipeFilter {
        RecipeFilter {
            meal_type: Some("dinner".into()),
            dietary_preferences: vec!["vegan".into(), "gluten-free".into()],
            max_total_time: Some(45),
            author_id: None,
            search: Some("pasta".into()),
        }
    }

    #[test]
    fn count_and_data_share_the_same_predicate() {
        let filter = filter_all();
        let count_sql = count_query(&filter).into_sql();
        let data_sql = data_query(&filter, 10, 0).into_sql();

        let count_predicate = count_sql.split("WHERE 1=1").nth(1).unwrap().to_string();
        let data_predicate = data_sql
            .split("WHERE 1=1")
            .nth(1)
            .unwrap()
            .split(" ORDER BY")
            .next()
            .unwrap()
            .to_string();
        assert_eq!(count_predicate, data_predicate);
    }

    #[test]
    fn each_dietary_preference_adds_one_exists_clause() {
        let filter = filter_all();
        let sql = count_query(&filter).into_sql();
        // one for meal type plus one per preference
        assert_eq!(sql.matches("EXISTS (SELECT 1 FROM recipe_tags").count(), 3);
    }

    #[test]
    fn public_listing_is_approved_only() {
        let sql = count_query(&RecipeFilter::default()).into_sql();
        assert!(sql.contains("r.status ="));
        assert!(!sql.contains("r.author_id"));
    }

    #[test]
    fn author_filter_bypasses_status_restriction() {
        let filter = RecipeFilter {
            author_id: Some(Uuid::new_v4()),
            ..Default::default()
        };
        let sql = count_query(&filter).into_sql();
        assert!(sql.contains("r.author_id ="));
        assert!(!sql.contains("r.status"));
    }

    #[test]
    fn ordering_is_deterministic() {
        let sql = data_query(&RecipeFilter::default(), 10, 0).into_sql();
        assert!(sql.contains("ORDER BY r.created_at DESC, r.id DESC"));
    }

    #[test]
    fn total_pages_is_ceiling_division() {
        assert_eq!(total_pages(0, 10), 0);
        assert_eq!(total_pages(1, 10), 1);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
        assert_eq!(total_pages(25, 10), 3);
    }

    #[test]
    fn normalize_page_applies_defaults_and_floors() {
        assert_eq!(normalize_page(None, None), (1, 10));
        assert_eq!(normalize_page(Some(0), Some(0)), (1, 1));
        assert_eq!(normalize_page(Some(-3), Some(-1)), (1, 1));
        assert_eq!(normalize_page(Some(4), Some(25)), (4, 25));
    }

    #[test]
    fn page_offset_saturates_instead_of_overflowing() {
        let (page, limit) = normalize_page(Some(i64::MAX), Some(10));
        assert_eq!(page_offset(page, limit), i64::MAX);
        assert_eq!(page_offset(1, 10), 0);
        assert_eq!(page_offset(3, 10), 20);
    }
}
