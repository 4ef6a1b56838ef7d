use std::fmt::Display;

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ArmReport {
    pub name: String,
    pub weight: f64,
    pub picks: u32,
}

/// State of a simulation after some rounds, arms from the highest weight to the lowest.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SimReport {
    pub round: u32,
    pub successes: u32,
    pub total_weight: f64,
    pub avg_weight: f64,
    pub arms: Vec<ArmReport>,
}

impl SimReport {
    pub fn to_ron(&self) -> Result<String, ron::Error> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
    }
}

impl Display for SimReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "round {}: {} successes, total weight {:.3}, avg weight {:.3}",
            self.round, self.successes, self.total_weight, self.avg_weight
        )?;
        for arm in self.arms.iter() {
            writeln!(f, "  {:<16} {:>10.3} {:>8} picks", arm.name, arm.weight, arm.picks)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test_report {
    use super::*;

    fn report() -> SimReport {
        SimReport {
            round: 3,
            successes: 2,
            total_weight: 12.5,
            avg_weight: 6.25,
            arms: vec![
                ArmReport {
                    name: "a".to_string(),
                    weight: 10.0,
                    picks: 2,
                },
                ArmReport {
                    name: "b".to_string(),
                    weight: 2.5,
                    picks: 1,
                },
            ],
        }
    }

    #[test]
    fn table() {
        let text = report().to_string();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("round 3: 2 successes, total weight 12.500, avg weight 6.250")
        );
        assert!(lines.next().unwrap().trim_start().starts_with("a "));
        assert!(lines.next().unwrap().ends_with("1 picks"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn ron_summary() {
        let ron_str = report().to_ron().unwrap();
        let parsed: SimReport = ron::from_str(&ron_str).unwrap();
        assert_eq!(parsed, report());
    }
}
