use std::fmt;

/// Bookkeeping from a single search call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub nodes_expanded: usize,
    pub nodes_discovered: usize,
    /// Number of moves in the returned route, `None` when no path was found.
    pub path_length: Option<usize>,
    /// The node budget ran out before the goal was reached.
    pub budget_exhausted: bool,
}

impl SearchStats {
    pub fn found(&self) -> bool {
        self.path_length.is_some()
    }

    /// Expanded nodes per move of the final route. 0.0 when nothing was found.
    pub fn expansion_ratio(&self) -> f64 {
        match self.path_length {
            Some(length) if length > 0 => self.nodes_expanded as f64 / length as f64,
            _ => 0.0,
        }
    }
}

impl fmt::Display for SearchStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Nodes expanded: {}", self.nodes_expanded)?;
        writeln!(f, "Nodes discovered: {}", self.nodes_discovered)?;
        match self.path_length {
            Some(length) => {
                writeln!(f, "Path length: {}", length)?;
                writeln!(f, "Expansions per move: {:.2}", self.expansion_ratio())?;
            }
            None if self.budget_exhausted => {
                writeln!(f, "Path length: none (node budget exhausted)")?;
            }
            None => writeln!(f, "Path length: none")?,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expansion_ratio() {
        let stats = SearchStats {
            nodes_expanded: 12,
            nodes_discovered: 20,
            path_length: Some(4),
            budget_exhausted: false,
        };
        assert!(stats.found());
        assert!((stats.expansion_ratio() - 3.0).abs() < f64::EPSILON);
        assert_eq!(SearchStats::default().expansion_ratio(), 0.0);
    }

    #[test]
    fn test_display_mentions_budget() {
        let stats = SearchStats {
            nodes_expanded: 100,
            nodes_discovered: 140,
            path_length: None,
            budget_exhausted: true,
        };
        let text = stats.to_string();
        assert!(text.contains("Nodes expanded: 100"));
        assert!(text.contains("budget exhausted"));
    }
}
