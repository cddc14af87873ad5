use crate::core::io::score_table::ScoreTableFile;
use crate::core::models::pair::PairKey;
use crate::core::potential::params::PotentialConfig;
use crate::core::potential::table::ScoreTable;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::tasks;
use crate::engine::tasks::structure_scoring::ScoredStructure;
use crate::engine::utils::files::{list_groups, list_structure_files};
use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

/// Scores of one group of candidate structures (e.g. the models submitted for a
/// single target).
#[derive(Debug, Clone, PartialEq)]
pub struct GroupEvaluation {
    pub name: String,
    pub structures: Vec<ScoredStructure>,
}

impl GroupEvaluation {
    /// Arithmetic mean of the structure scores, or 0 for an empty group.
    ///
    /// This is the group's representative pseudo-energy (the "estimated Gibbs free
    /// energy"); it is a relative score, not a calibrated free energy.
    pub fn mean_energy(&self) -> f64 {
        if self.structures.is_empty() {
            return 0.0;
        }
        let sum: f64 = self.structures.iter().map(|s| s.score.total).sum();
        sum / self.structures.len() as f64
    }
}

/// Scores the given structures as one group.
pub fn evaluate_group(
    name: &str,
    paths: &[PathBuf],
    table: &ScoreTable,
    config: &PotentialConfig,
    reporter: &ProgressReporter,
) -> Result<GroupEvaluation, EngineError> {
    let structures = tasks::structure_scoring::run(name, paths, table, config, reporter)?;
    let group = GroupEvaluation {
        name: name.to_string(),
        structures,
    };
    info!(
        "Group '{}': {} structure(s), mean energy {:.4}.",
        group.name,
        group.structures.len(),
        group.mean_energy()
    );
    Ok(group)
}

/// Evaluates every sub-directory of `base_dir` as a group of `*.pdb` candidates,
/// using the score table stored in `score_dir`.
#[instrument(skip_all, name = "evaluation_workflow")]
pub fn run(
    base_dir: &Path,
    score_dir: &Path,
    config: &PotentialConfig,
    reporter: &ProgressReporter,
) -> Result<BTreeMap<String, GroupEvaluation>, EngineError> {
    reporter.report(Progress::PhaseStart {
        name: "Loading score table",
    });
    let table = ScoreTableFile::read_from_dir(score_dir, config.num_bins)?;
    if table.is_empty() {
        warn!(
            "No pair profiles loaded from {:?}; every structure will score 0.",
            score_dir
        );
    }
    let groups = list_groups(base_dir)?;
    info!(
        "Loaded {} pair profile(s); found {} group(s) in {:?}.",
        table.len(),
        groups.len(),
        base_dir
    );
    reporter.report(Progress::PhaseFinish);

    let mut results = BTreeMap::new();
    for (name, dir) in groups {
        let paths = list_structure_files(&dir)?;
        let group = evaluate_group(&name, &paths, &table, config, reporter)?;
        results.insert(name, group);
    }
    Ok(results)
}

/// Writes one row per scored structure: `group,structure,energy`, followed by one
/// column per canonical pair holding that pair's contribution (empty when the pair
/// did not contribute).
pub fn write_report_csv<'a, W, I>(groups: I, writer: W) -> Result<(), EngineError>
where
    W: Write,
    I: IntoIterator<Item = &'a GroupEvaluation>,
{
    let mut csv_writer = csv::Writer::from_writer(writer);
    let mut header = vec!["group".to_string(), "structure".to_string(), "energy".to_string()];
    header.extend(PairKey::ALL.iter().map(PairKey::to_string));
    csv_writer.write_record(&header)?;

    for group in groups {
        for scored in &group.structures {
            let structure = scored
                .path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| scored.path.display().to_string());
            let mut record = vec![
                group.name.clone(),
                structure,
                format!("{:.4}", scored.score.total),
            ];
            record.extend(PairKey::ALL.iter().map(|key| {
                scored
                    .score
                    .per_pair
                    .get(key)
                    .map(|e| format!("{:.4}", e))
                    .unwrap_or_default()
            }));
            csv_writer.write_record(&record)?;
        }
    }
    csv_writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::potential::scoring::StructureScore;
    use std::fs;
    use tempfile::tempdir;

    fn c3_line(res_name: &str, seq: isize, z: f64) -> String {
        format!(
            "ATOM  {:>5}  C3' {:>3} A{:>4}    {:>8.3}{:>8.3}{:>8.3}  1.00  0.00           C\n",
            seq, res_name, seq, 0.0, 0.0, z
        )
    }

    fn scored(path: &str, total: f64) -> ScoredStructure {
        scored_with_pairs(path, &[("AU", total)])
    }

    fn scored_with_pairs(path: &str, pairs: &[(&str, f64)]) -> ScoredStructure {
        let per_pair: BTreeMap<PairKey, f64> = pairs
            .iter()
            .map(|(key, energy)| (key.parse().unwrap(), *energy))
            .collect();
        ScoredStructure {
            path: PathBuf::from(path),
            score: StructureScore {
                total: per_pair.values().sum(),
                per_pair,
            },
        }
    }

    #[test]
    fn mean_energy_averages_structure_scores() {
        let group = GroupEvaluation {
            name: "p1".to_string(),
            structures: vec![scored("a.pdb", 1.0), scored("b.pdb", 2.0), scored("c.pdb", 6.0)],
        };
        assert_eq!(group.mean_energy(), 3.0);
    }

    #[test]
    fn mean_energy_of_empty_group_is_zero() {
        let group = GroupEvaluation {
            name: "empty".to_string(),
            structures: Vec::new(),
        };
        assert_eq!(group.mean_energy(), 0.0);
    }

    #[test]
    fn run_evaluates_each_group_directory() {
        let base = tempdir().unwrap();
        let scores = tempdir().unwrap();
        fs::write(scores.path().join("AC.txt"), "0.0000\n".repeat(20)).unwrap();

        let p1 = base.path().join("puzzle_1");
        fs::create_dir(&p1).unwrap();
        // One structure with a single AC pair, one with an AU pair only.
        fs::write(p1.join("m1.pdb"), [c3_line("A", 1, 0.0), c3_line("C", 5, 3.5)].concat()).unwrap();
        fs::write(p1.join("m2.pdb"), [c3_line("A", 1, 0.0), c3_line("U", 5, 3.5)].concat()).unwrap();
        fs::write(p1.join("notes.txt"), "ignored").unwrap();

        let p2 = base.path().join("puzzle_2");
        fs::create_dir(&p2).unwrap();
        fs::write(base.path().join("stray.pdb"), c3_line("A", 1, 0.0)).unwrap();

        let results = run(
            base.path(),
            scores.path(),
            &PotentialConfig::default(),
            &ProgressReporter::new(),
        )
        .unwrap();

        assert_eq!(results.keys().collect::<Vec<_>>(), vec!["puzzle_1", "puzzle_2"]);
        let single_ac = 190.0 - (20.0f64).ln();
        let p1_result = &results["puzzle_1"];
        assert_eq!(p1_result.structures.len(), 2);
        assert!((p1_result.structures[0].score.total - single_ac).abs() < 1e-9);
        assert_eq!(p1_result.structures[1].score.total, 0.0);
        assert!((p1_result.mean_energy() - single_ac / 2.0).abs() < 1e-9);
        assert!(
            p1_result.structures[0]
                .score
                .per_pair
                .contains_key(&"AC".parse::<PairKey>().unwrap())
        );
        assert_eq!(results["puzzle_2"].mean_energy(), 0.0);
    }

    #[test]
    fn run_fails_for_malformed_score_table() {
        let base = tempdir().unwrap();
        let scores = tempdir().unwrap();
        fs::write(scores.path().join("GG.txt"), "1.0\n").unwrap();
        let result = run(
            base.path(),
            scores.path(),
            &PotentialConfig::default(),
            &ProgressReporter::new(),
        );
        assert!(matches!(result, Err(EngineError::ScoreTable { .. })));
    }

    #[test]
    fn write_report_csv_emits_total_and_per_pair_breakdown() {
        let groups = vec![
            GroupEvaluation {
                name: "p1".to_string(),
                structures: vec![
                    scored_with_pairs("/tmp/x/a.pdb", &[("AC", 1.23456), ("GU", -0.5)]),
                    scored_with_pairs("b.pdb", &[]),
                ],
            },
            GroupEvaluation {
                name: "p2".to_string(),
                structures: vec![scored_with_pairs("c.pdb", &[("UU", 0.5)])],
            },
        ];
        let mut out = Vec::new();
        write_report_csv(&groups, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "group,structure,energy,AA,AC,AG,AU,CC,CG,CU,GG,GU,UU",
                "p1,a.pdb,0.7346,,1.2346,,,,,,,-0.5000,",
                "p1,b.pdb,0.0000,,,,,,,,,,",
                "p2,c.pdb,0.5000,,,,,,,,,,0.5000",
            ]
        );
    }

    #[test]
    fn report_breakdown_sums_to_structure_energy() {
        let base = tempdir().unwrap();
        let scores = tempdir().unwrap();
        for key in ["AC", "AU"] {
            fs::write(scores.path().join(format!("{key}.txt")), "1.0\n".repeat(20)).unwrap();
        }
        let group = base.path().join("g");
        fs::create_dir(&group).unwrap();
        fs::write(
            group.join("m.pdb"),
            [c3_line("A", 1, 0.0), c3_line("C", 5, 3.5), c3_line("U", 9, 7.2)].concat(),
        )
        .unwrap();

        let results = run(
            base.path(),
            scores.path(),
            &PotentialConfig::default(),
            &ProgressReporter::new(),
        )
        .unwrap();
        let mut out = Vec::new();
        write_report_csv(results.values(), &mut out).unwrap();

        let mut reader = csv::Reader::from_reader(out.as_slice());
        let headers = reader.headers().unwrap().clone();
        let row = reader.records().next().unwrap().unwrap();
        let energy: f64 = row[2].parse().unwrap();
        let breakdown: f64 = (3..headers.len())
            .filter(|&i| !row[i].is_empty())
            .map(|i| row[i].parse::<f64>().unwrap())
            .sum();
        assert!((energy - breakdown).abs() < 1e-3);
        assert!(!row[headers.iter().position(|h| h == "AC").unwrap()].is_empty());
        assert!(!row[headers.iter().position(|h| h == "AU").unwrap()].is_empty());
        assert!(row[headers.iter().position(|h| h == "CU").unwrap()].is_empty());
    }
}
