use crate::filter::RecipeFilters;

/// Substituted when the composed query text is empty so the embedding
/// provider always receives non-empty input.
pub const DEFAULT_QUERY_TEXT: &str = "balanced healthy meal";

/// Composes the text sent to the embedding provider: the trimmed free-text
/// query, a cuisine clause, and a dietary clause, joined by ". ".
pub fn build_query_text(filters: &RecipeFilters) -> String {
	let mut clauses = Vec::new();

	if let Some(query) = filters.query.as_deref() {
		let trimmed = query.trim();

		if !trimmed.is_empty() {
			clauses.push(trimmed.to_string());
		}
	}
	if !filters.cuisines.is_empty() {
		clauses.push(format!("{} cuisine", filters.cuisines.join(", ")));
	}
	if !filters.dietary_tags.is_empty() {
		clauses.push(format!("{} dietary preferences", filters.dietary_tags.join(", ")));
	}

	if clauses.is_empty() {
		return DEFAULT_QUERY_TEXT.to_string();
	}

	clauses.join(". ")
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn composes_all_clauses_in_order() {
		let filters = RecipeFilters {
			query: Some("  quick high protein dinner  ".to_string()),
			cuisines: vec!["Thai".to_string(), "Vietnamese".to_string()],
			dietary_tags: vec!["gluten-free".to_string()],
			..Default::default()
		};

		assert_eq!(
			build_query_text(&filters),
			"quick high protein dinner. Thai, Vietnamese cuisine. gluten-free dietary preferences"
		);
	}

	#[test]
	fn skips_absent_clauses() {
		let filters =
			RecipeFilters { dietary_tags: vec!["vegan".to_string()], ..Default::default() };

		assert_eq!(build_query_text(&filters), "vegan dietary preferences");
	}

	#[test]
	fn empty_composition_falls_back_to_default_phrase() {
		assert_eq!(build_query_text(&RecipeFilters::default()), DEFAULT_QUERY_TEXT);

		let filters = RecipeFilters { query: Some("   ".to_string()), ..Default::default() };

		assert_eq!(build_query_text(&filters), DEFAULT_QUERY_TEXT);
	}
}
