use std::collections::HashMap;

use hvilog_parser::ClassingRecord;
use serde::{Deserialize, Serialize};

use crate::calculator::{quality_index, QualityInputs};

/// Per-bale aggregate: one per distinct bale number, in first-seen order.
///
/// Numeric fields hold full-precision means; display rounding is applied by
/// the table builder, after the quality index has been computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaleAggregate {
    pub bale_number: String,
    pub testing_mode: String,
    pub gin_code: String,
    pub mic: f64,
    pub rd: f64,
    pub b_plus: f64,
    /// Most frequent grade in the group, earliest value winning ties.
    pub color_grade: String,
    pub area: f64,
    pub cnt: f64,
    pub trash_leaf: f64,
    pub len: f64,
    pub unf: f64,
    pub strength: f64,
    pub sfi: f64,
    pub elg: f64,
    pub retest: String,
    pub retest_code: String,
    pub line_number: i64,
    pub sci: f64,
}

#[derive(Debug)]
struct BaleAccumulator {
    testing_mode: String,
    gin_code: String,
    retest: String,
    retest_code: String,
    line_number: i64,
    count: usize,
    mic: f64,
    rd: f64,
    b_plus: f64,
    area: f64,
    cnt: f64,
    trash_leaf: f64,
    len: f64,
    unf: f64,
    strength: f64,
    sfi: f64,
    elg: f64,
    color_grades: Vec<String>,
}

impl BaleAccumulator {
    fn new(record: &ClassingRecord) -> Self {
        let mut acc = Self {
            testing_mode: record.testing_mode.clone(),
            gin_code: record.gin_code.clone(),
            retest: record.retest.clone(),
            retest_code: record.retest_code.clone(),
            line_number: record.line_number,
            count: 0,
            mic: 0.0,
            rd: 0.0,
            b_plus: 0.0,
            area: 0.0,
            cnt: 0.0,
            trash_leaf: 0.0,
            len: 0.0,
            unf: 0.0,
            strength: 0.0,
            sfi: 0.0,
            elg: 0.0,
            color_grades: Vec::new(),
        };
        acc.push(record);
        acc
    }

    fn push(&mut self, record: &ClassingRecord) {
        self.count += 1;
        self.mic += record.mic;
        self.rd += record.rd;
        self.b_plus += record.b_plus;
        self.area += record.area;
        self.cnt += record.cnt as f64;
        self.trash_leaf += record.trash_leaf as f64;
        self.len += record.len;
        self.unf += record.unf;
        self.strength += record.strength;
        self.sfi += record.sfi;
        self.elg += record.elg;
        self.color_grades.push(record.color_grade.clone());
    }

    fn finish(self, bale_number: String) -> BaleAggregate {
        let n = self.count as f64;
        let mic = self.mic / n;
        let rd = self.rd / n;
        let b_plus = self.b_plus / n;
        let len = self.len / n;
        let unf = self.unf / n;
        let strength = self.strength / n;

        let sci = quality_index(&QualityInputs {
            strength,
            mic,
            len,
            unf,
            rd,
            b_plus,
        });

        BaleAggregate {
            bale_number,
            testing_mode: self.testing_mode,
            gin_code: self.gin_code,
            mic,
            rd,
            b_plus,
            color_grade: mode_first_wins(&self.color_grades),
            area: self.area / n,
            cnt: self.cnt / n,
            trash_leaf: self.trash_leaf / n,
            len,
            unf,
            strength,
            sfi: self.sfi / n,
            elg: self.elg / n,
            retest: self.retest,
            retest_code: self.retest_code,
            line_number: self.line_number,
            sci,
        }
    }
}

/// Group records by bale number and reduce each group to one [`BaleAggregate`].
///
/// Grouping is by exact string equality, preserving first-seen group order.
/// Means are unweighted; every record counts as one observation.
pub fn aggregate_bales(records: &[ClassingRecord]) -> Vec<BaleAggregate> {
    let mut order: Vec<String> = Vec::new();
    let mut groups: HashMap<String, BaleAccumulator> = HashMap::new();

    for record in records {
        if let Some(acc) = groups.get_mut(&record.bale_number) {
            acc.push(record);
        } else {
            order.push(record.bale_number.clone());
            groups.insert(record.bale_number.clone(), BaleAccumulator::new(record));
        }
    }

    order
        .into_iter()
        .map(|bale| {
            let acc = groups.remove(&bale).expect("bale accumulator missing");
            acc.finish(bale)
        })
        .collect()
}

/// Statistical mode with the standard first-occurrence tie-break: among the
/// values with the highest count, the one encountered earliest wins.
fn mode_first_wins(values: &[String]) -> String {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for value in values {
        *counts.entry(value.as_str()).or_insert(0) += 1;
    }

    let mut best: Option<(&str, usize)> = None;
    for value in values {
        let count = counts[value.as_str()];
        match best {
            Some((_, best_count)) if best_count >= count => {}
            _ => best = Some((value, count)),
        }
    }

    best.map(|(value, _)| value.to_string()).unwrap_or_default()
}
