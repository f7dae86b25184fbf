const SCHEMA_SQL: &str = "\
CREATE TABLE IF NOT EXISTS recipes (
	recipe_id UUID PRIMARY KEY,
	title TEXT NOT NULL,
	cuisine TEXT NOT NULL,
	meal_type TEXT NOT NULL,
	servings INT NOT NULL,
	prep_minutes INT NOT NULL,
	cook_minutes INT NOT NULL,
	summary TEXT NOT NULL,
	instructions TEXT NOT NULL,
	dietary_tags JSONB NOT NULL DEFAULT '[]'::jsonb,
	allergens JSONB NOT NULL DEFAULT '[]'::jsonb,
	macros JSONB NOT NULL,
	micros JSONB NOT NULL DEFAULT '{}'::jsonb,
	sustainability JSONB NOT NULL,
	rating_sum DOUBLE PRECISION NOT NULL DEFAULT 0,
	rating_count INT NOT NULL DEFAULT 0,
	rating_average DOUBLE PRECISION NOT NULL DEFAULT 3,
	embedding_id UUID,
	created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
	updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE TABLE IF NOT EXISTS recipe_embeddings (
	embedding_id UUID PRIMARY KEY,
	recipe_id UUID NOT NULL REFERENCES recipes(recipe_id) ON DELETE CASCADE,
	model TEXT NOT NULL,
	embedding_dim INT NOT NULL,
	vec JSONB NOT NULL,
	created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
	UNIQUE (recipe_id, model)
);

CREATE TABLE IF NOT EXISTS reviews (
	review_id UUID PRIMARY KEY,
	recipe_id UUID NOT NULL REFERENCES recipes(recipe_id) ON DELETE CASCADE,
	user_id UUID NOT NULL,
	rating INT NOT NULL CHECK (rating BETWEEN 1 AND 5),
	comment TEXT,
	status TEXT NOT NULL DEFAULT 'pending',
	moderator_id UUID,
	moderated_at TIMESTAMPTZ,
	notes TEXT,
	created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX IF NOT EXISTS idx_recipe_embeddings_model ON recipe_embeddings (model);

CREATE INDEX IF NOT EXISTS idx_reviews_recipe_status ON reviews (recipe_id, status);

CREATE INDEX IF NOT EXISTS idx_recipes_cuisine ON recipes (cuisine);
";

pub fn render_schema() -> String {
	SCHEMA_SQL.to_string()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn schema_declares_all_tables() {
		let sql = render_schema();

		for table in ["recipes", "recipe_embeddings", "reviews"] {
			assert!(
				sql.contains(&format!("CREATE TABLE IF NOT EXISTS {table}")),
				"Schema is missing table {table}."
			);
		}
	}

	#[test]
	fn schema_statements_split_cleanly() {
		let statements =
			render_schema().split(';').filter(|s| !s.trim().is_empty()).count();

		assert_eq!(statements, 6);
	}
}
