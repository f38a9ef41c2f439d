//! Differentiation Protocol Database
//!
//! Immutable mapping from a cell-type key to an ordered list of protocol
//! steps, built once at startup. The built-in table covers the three demo
//! protocols (neuron, heart cell, retinal cell); deployments can replace it
//! with a JSON file of the same shape via `RecipeDb::load`.
//!
//! Lookups lowercase the key. Misses return a fixed sentinel list rather
//! than an error, so the endpoint always has a well-formed response body.

use anyhow::{Context, Result};
use rustc_hash::FxHashMap;
use std::fs;
use std::path::Path;

/// Sentinel returned when a cell type has no protocol in the table.
pub const NOT_FOUND_SENTINEL: &str =
    "Protocol not found in database. Try 'neuron', 'heart cell', or 'retinal cell'.";

/// Immutable protocol table. Keys are stored lowercase.
#[derive(Debug)]
pub struct RecipeDb {
    recipes: FxHashMap<String, Vec<String>>,
}

impl RecipeDb {
    /// Build the table from `(key, steps)` pairs, lowercasing keys.
    fn from_pairs(pairs: impl IntoIterator<Item = (String, Vec<String>)>) -> Self {
        let recipes = pairs
            .into_iter()
            .map(|(k, v)| (k.to_lowercase(), v))
            .collect();
        Self { recipes }
    }

    /// The built-in demo protocol table.
    pub fn builtin() -> Self {
        let owned = |steps: &[&str]| steps.iter().map(|s| s.to_string()).collect::<Vec<_>>();

        Self::from_pairs([
            (
                "neuron".to_string(),
                owned(&[
                    "Day 0: Plate neural progenitor cells on poly-ornithine coated plates.",
                    "Day 1: Add BDNF (50ng/ml) and ascorbic acid (200uM) to medium.",
                    "Day 3: Replace 50% of medium with fresh differentiation cocktail.",
                    "Day 7: Cells should express MAP2 and beta-tubulin III. Passage if necessary.",
                ]),
            ),
            (
                "heart cell".to_string(),
                owned(&[
                    "Day 0: Start with iPSCs at 80% confluency.",
                    "Day 1: Add Activin A (100ng/ml) for primitive streak induction.",
                    "Day 3: Switch to BMP4 (50ng/ml) and FGF2 (20ng/ml) for cardiac mesoderm specification.",
                    "Day 5: Begin serum-free differentiation. Monitor for spontaneous beating.",
                    "Day 10: >30% of cells should be cTnT positive.",
                ]),
            ),
            (
                "retinal cell".to_string(),
                owned(&[
                    "Day 0: Aggregate pluripotent stem cells into embryoid bodies.",
                    "Day 3: Add BMP4 (10ng/ml) and suppress FGF signaling.",
                    "Day 6: Plate aggregates on Matrigel. Add Retinoic Acid (1uM).",
                    "Day 12: Isolate RX+/PAX6+ retinal progenitor cells.",
                    "Day 20: Mature cells should express Rhodopsin and Recoverin.",
                ]),
            ),
        ])
    }

    /// Load a protocol table from a JSON object file:
    /// `{ "cell type": ["step", ...], ... }`.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read recipe database: {:?}", path))?;

        let recipes: FxHashMap<String, Vec<String>> = serde_json::from_str(&contents)
            .with_context(|| "Failed to parse recipe database JSON")?;

        if recipes.is_empty() {
            anyhow::bail!("Recipe database {:?} contains no protocols", path);
        }

        Ok(Self::from_pairs(recipes))
    }

    /// Look up the protocol for `cell_type` (case-insensitive).
    ///
    /// A miss yields the single-entry sentinel list, never an error.
    pub fn lookup(&self, cell_type: &str) -> Vec<String> {
        match self.recipes.get(&cell_type.to_lowercase()) {
            Some(steps) => steps.clone(),
            None => vec![NOT_FOUND_SENTINEL.to_string()],
        }
    }

    /// Number of protocols in the table.
    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}
