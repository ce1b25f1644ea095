#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Concept classification: a strict priority chain over the heuristic
//! detector families, then a statistical topic model, then keyword rules.
//!
//! The chain is not a weighted vote. A low-confidence syntax match always
//! outranks a high-confidence topic prediction; the order of
//! [`ConceptClassifier::STAGES`] is the tie-break rule.

use std::{collections::BTreeMap, fs, path::Path, sync::LazyLock};

use anyhow::{Context, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    constants::{
        COMPILATION_ERROR, DEFAULT_CONCEPT, LOGIC_ERROR, MODEL_DEFAULT_CONFIDENCE,
        RULE_CONFIDENCE, SYNTAX_ERROR,
    },
    heuristics::{self, DetectorFamily},
    language::Language,
};

/// Block comments (`/* ... */`).
static BLOCK_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)/\*.*?\*/").expect("block-comment regex compiles"));

/// Line comments (`// ...`).
static LINE_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"//[^\n]*").expect("line-comment regex compiles"));

/// Hash comments (`# ...`), which also swallow preprocessor directives.
static HASH_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)#.*$").expect("hash-comment regex compiles"));

/// Double-quoted string literals.
static DQUOTE_STRING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""[^"\n]*""#).expect("dquote-string regex compiles"));

/// Single-quoted string literals.
static SQUOTE_STRING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"'[^'\n]*'").expect("squote-string regex compiles"));

/// Normalizes code for the statistical model: strips comments and string
/// literals of every supported grammar, collapses whitespace, lowercases.
pub fn normalize_code(code: &str) -> String {
    let code = BLOCK_COMMENT.replace_all(code, " ");
    let code = LINE_COMMENT.replace_all(&code, " ");
    let code = HASH_COMMENT.replace_all(&code, " ");
    let code = DQUOTE_STRING.replace_all(&code, "STRING");
    let code = SQUOTE_STRING.replace_all(&code, "STRING");

    code.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Splits normalized code into identifier-like tokens.
fn tokenize(normalized: &str) -> Vec<String> {
    normalized
        .split(|c: char| !c.is_ascii_alphanumeric() && c != '_')
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Labelled snippets the default model is trained from, two per topic label.
const TRAINING_SAMPLES: &[(&str, &str)] = &[
    (
        "Binary Search",
        "def binary_search(arr, target):\n    left, right = 0, len(arr)-1\n    while left <= right:\n        mid = (left + right) // 2",
    ),
    (
        "Binary Search",
        "int lo = 0, hi = n - 1;\nwhile (lo <= hi) {\n    int mid = lo + (hi - lo) / 2;\n    if (a[mid] == target) break;\n}",
    ),
    (
        "Dynamic Programming",
        "dp = [0] * (n+1)\nfor i in range(1, n+1):\n    dp[i] = dp[i-1] + dp[i-2]",
    ),
    (
        "Dynamic Programming",
        "vector<long long> dp(n + 1);\ndp[0] = 1;\nfor (int i = 1; i <= n; i++)\n    dp[i] = dp[i - 1] + dp[i - 2];",
    ),
    (
        "Graph Traversal",
        "def dfs(graph, node, visited):\n    visited.add(node)\n    for neighbor in graph[node]:",
    ),
    (
        "Graph Traversal",
        "queue<int> q;\nq.push(start);\nwhile (!q.empty()) {\n    int node = q.front(); q.pop();\n    for (int next : adj[node])\n        if (!visited[next]) q.push(next);\n}",
    ),
    (
        "Sorting",
        "arr.sort()\nfor i in range(len(arr)):\n    print(arr[i])",
    ),
    (
        "Sorting",
        "sort(a.begin(), a.end());\nfor (auto x : a) cout << x;",
    ),
    (
        "Array Manipulation",
        "result = []\nfor i in range(len(arr)):\n    result.append(arr[i] * 2)",
    ),
    (
        "Array Manipulation",
        "int prefix[100005];\nprefix[0] = a[0];\nfor (int i = 1; i < n; i++)\n    prefix[i] = prefix[i - 1] + a[i];",
    ),
    (
        "String Processing",
        "text = input().strip()\nwords = text.split()\nresult = ' '.join(words)",
    ),
    (
        "String Processing",
        "string s;\ncin >> s;\nreverse(s.begin(), s.end());\nif (s == t) cout << \"same\";",
    ),
    (
        "Tree Algorithms",
        "class TreeNode:\n    def __init__(self, val=0):\n        self.val = val\n        self.left = None",
    ),
    (
        "Tree Algorithms",
        "struct Node { int val; Node *left, *right; };\nint depth(Node *root) {\n    if (!root) return 0;\n    return 1 + max(depth(root->left), depth(root->right));\n}",
    ),
    (
        "Greedy Algorithm",
        "total = 0\nfor item in items:\n    if item > threshold:\n        total += item",
    ),
    (
        "Greedy Algorithm",
        "sort(intervals.begin(), intervals.end());\nint taken = 0, last = -1;\nfor (auto &iv : intervals)\n    if (iv.first >= last) { taken++; last = iv.second; }",
    ),
    (
        "Backtracking",
        "def solve(board, row):\n    if row == n:\n        return True\n    for col in range(n):",
    ),
    (
        "Backtracking",
        "void permute(vector<int> &nums, int k) {\n    if (k == nums.size()) { answers.push_back(nums); return; }\n    for (int i = k; i < nums.size(); i++) {\n        swap(nums[i], nums[k]);\n        permute(nums, k + 1);\n        swap(nums[i], nums[k]);\n    }\n}",
    ),
    (
        "Mathematics",
        "import math\nresult = math.sqrt(x**2 + y**2)\nprint(f'Distance: {result}')",
    ),
    (
        "Mathematics",
        "long long gcd(long long a, long long b) {\n    return b == 0 ? a : gcd(b, a % b);\n}",
    ),
    (
        "General Programming",
        "x = int(input())\ny = int(input())\nprint(x + y)",
    ),
    (
        "General Programming",
        "int a, b;\ncin >> a >> b;\ncout << a + b << endl;",
    ),
];

/// One label's normalized TF-IDF centroid.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Centroid {
    /// Topic label.
    label: String,
    /// L2-normalized centroid vector over the model vocabulary.
    vector: Vec<f64>,
}

/// A trained topic model: TF-IDF statistics plus one centroid per label.
///
/// Read-only after construction and cheap to share; prediction is cosine
/// similarity against each centroid, with the predicted-class probability
/// taken as the winner's share of the positive similarity mass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConceptModel {
    /// Term to vector-index mapping.
    vocabulary: BTreeMap<String, usize>,
    /// Inverse document frequency per vector index.
    idf: Vec<f64>,
    /// Per-label centroids, in label first-appearance order.
    centroids: Vec<Centroid>,
}

impl ConceptModel {
    /// Trains a model from labelled `(label, code)` samples.
    pub fn train(samples: &[(&str, &str)]) -> Self {
        let docs: Vec<(String, Vec<String>)> = samples
            .iter()
            .map(|(label, code)| (label.to_string(), tokenize(&normalize_code(code))))
            .collect();

        let mut vocabulary: BTreeMap<String, usize> = BTreeMap::new();
        for (_, tokens) in &docs {
            for token in tokens {
                let next = vocabulary.len();
                vocabulary.entry(token.clone()).or_insert(next);
            }
        }

        let mut document_frequency = vec![0usize; vocabulary.len()];
        for (_, tokens) in &docs {
            let mut seen = vec![false; vocabulary.len()];
            for token in tokens {
                seen[vocabulary[token]] = true;
            }
            for (index, present) in seen.iter().enumerate() {
                if *present {
                    document_frequency[index] += 1;
                }
            }
        }

        let doc_count = docs.len() as f64;
        let idf: Vec<f64> = document_frequency
            .iter()
            .map(|df| ((1.0 + doc_count) / (1.0 + *df as f64)).ln() + 1.0)
            .collect();

        let mut centroids: Vec<(String, Vec<f64>, usize)> = Vec::new();
        for (label, tokens) in &docs {
            let vector = vectorize(tokens, &vocabulary, &idf);
            match centroids.iter_mut().find(|(l, _, _)| l == label) {
                Some((_, sum, count)) => {
                    for (slot, value) in sum.iter_mut().zip(&vector) {
                        *slot += value;
                    }
                    *count += 1;
                }
                None => centroids.push((label.clone(), vector, 1)),
            }
        }

        let centroids = centroids
            .into_iter()
            .map(|(label, mut sum, count)| {
                for slot in sum.iter_mut() {
                    *slot /= count as f64;
                }
                l2_normalize(&mut sum);
                Centroid { label, vector: sum }
            })
            .collect();

        Self {
            vocabulary,
            idf,
            centroids,
        }
    }

    /// Trains the model from the embedded sample set.
    pub fn train_default() -> Self {
        Self::train(TRAINING_SAMPLES)
    }

    /// Loads a model snapshot from `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Could not read model snapshot at {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Could not parse model snapshot at {}", path.display()))
    }

    /// Writes a model snapshot to `path`, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Could not create model directory {}", parent.display())
            })?;
        }
        let raw = serde_json::to_string(self).context("Could not serialize model snapshot")?;
        fs::write(path, raw)
            .with_context(|| format!("Could not write model snapshot to {}", path.display()))
    }

    /// Loads the snapshot at `path` if one exists, otherwise trains the
    /// default model and snapshots it there.
    pub fn load_or_train(path: &Path) -> Result<Self> {
        if path.exists() {
            return Self::load(path);
        }

        info!(path = %path.display(), "no model snapshot found, training default model");
        let model = Self::train_default();
        model.save(path)?;
        Ok(model)
    }

    /// Predicts a topic label for pre-normalized code.
    ///
    /// Returns the winning label and its probability; the probability is
    /// `None` when the winner cannot be separated from a runner-up. Returns
    /// `None` outright when the code shares no vocabulary with the model.
    pub fn predict(&self, normalized: &str) -> Option<(String, Option<f64>)> {
        let tokens = tokenize(normalized);
        let mut vector = vectorize(&tokens, &self.vocabulary, &self.idf);
        if !l2_normalize(&mut vector) {
            return None;
        }

        let similarities: Vec<(&str, f64)> = self
            .centroids
            .iter()
            .map(|centroid| {
                let dot = centroid
                    .vector
                    .iter()
                    .zip(&vector)
                    .map(|(a, b)| a * b)
                    .sum::<f64>();
                (centroid.label.as_str(), dot)
            })
            .collect();

        let (best_label, best_sim) = similarities
            .iter()
            .copied()
            .max_by(|(_, a), (_, b)| a.total_cmp(b))?;
        if best_sim <= 0.0 {
            return None;
        }

        let tied = similarities
            .iter()
            .filter(|(label, sim)| *label != best_label && (best_sim - sim).abs() < f64::EPSILON)
            .count();
        if tied > 0 {
            return Some((best_label.to_string(), None));
        }

        let mass: f64 = similarities
            .iter()
            .map(|(_, sim)| sim.max(0.0))
            .sum();
        let probability = (best_sim / mass).clamp(0.0, 1.0);
        Some((best_label.to_string(), Some(probability)))
    }
}

/// Builds a TF-IDF vector for `tokens` over the given vocabulary.
fn vectorize(tokens: &[String], vocabulary: &BTreeMap<String, usize>, idf: &[f64]) -> Vec<f64> {
    let mut vector = vec![0f64; idf.len()];
    for token in tokens {
        if let Some(&index) = vocabulary.get(token) {
            vector[index] += 1.0;
        }
    }
    for (slot, weight) in vector.iter_mut().zip(idf) {
        *slot *= weight;
    }
    vector
}

/// Normalizes `vector` to unit length in place; false if it was all zero.
fn l2_normalize(vector: &mut [f64]) -> bool {
    let norm = vector.iter().map(|v| v * v).sum::<f64>().sqrt();
    if norm == 0.0 {
        return false;
    }
    for slot in vector.iter_mut() {
        *slot /= norm;
    }
    true
}

/// Ordered keyword rules used when no trained model is available; first row
/// with any matching keyword wins.
const RULE_TABLE: &[(&str, &[&str])] = &[
    ("Binary Search", &["binary", "left <= right", "mid ="]),
    ("Dynamic Programming", &["dp[", "memo", "dynamic"]),
    ("Graph Traversal", &["dfs", "bfs", "graph", "visited"]),
    ("Sorting", &["sort", "sorted", "quicksort", "mergesort"]),
    ("Tree Algorithms", &["tree", "root", "node", "leaf"]),
    ("Backtracking", &["backtrack", "recursive", "recursion"]),
    ("Greedy Algorithm", &["greedy", "minimum", "maximum"]),
    ("String Processing", &["string", "str", "char", "split"]),
    ("Mathematics", &["math", "sqrt", "formula"]),
];

/// Last-resort keyword classification over the lowercased code.
fn rule_based(code: &str) -> &'static str {
    let lowered = code.to_lowercase();

    for (label, keywords) in RULE_TABLE {
        if keywords.iter().any(|keyword| lowered.contains(keyword)) {
            return label;
        }
    }

    DEFAULT_CONCEPT
}

/// Resolves the single best-fit concept label for a snippet.
pub struct ConceptClassifier {
    /// Trained topic model, when one is available.
    model: Option<ConceptModel>,
}

impl ConceptClassifier {
    /// The priority chain: detector families paired with the concept label
    /// each one resolves to, evaluated in order, first non-empty wins.
    pub const STAGES: [(DetectorFamily, &'static str); 3] = [
        (DetectorFamily::Syntax, SYNTAX_ERROR),
        (DetectorFamily::Compilation, COMPILATION_ERROR),
        (DetectorFamily::Logic, LOGIC_ERROR),
    ];

    /// Creates a classifier around an optional trained model.
    pub fn new(model: Option<ConceptModel>) -> Self {
        Self { model }
    }

    /// Whether a trained model is attached.
    pub fn has_model(&self) -> bool {
        self.model.is_some()
    }

    /// Classifies `code`, returning the concept label and a confidence.
    ///
    /// Detector stages are consulted in [`Self::STAGES`] order and each
    /// non-empty stage short-circuits at its maximum match confidence; only
    /// when every stage is empty does the statistical model (then the
    /// keyword table) get a say.
    pub fn classify(&self, code: &str, language: Language) -> (String, f64) {
        for (family, label) in Self::STAGES {
            let issues = heuristics::run(family, code, language);
            if let Some(best) = issues.iter().map(|issue| issue.confidence()).reduce(f64::max)
            {
                return (label.to_string(), best);
            }
        }

        if let Some(model) = &self.model
            && let Some((label, probability)) = model.predict(&normalize_code(code))
        {
            return (label, probability.unwrap_or(MODEL_DEFAULT_CONFIDENCE));
        }

        (rule_based(code).to_string(), RULE_CONFIDENCE)
    }
}
