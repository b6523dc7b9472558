//! The scenario validator.

use fleetgrid_core::{Agent, BaseGrid, Footprint};

use crate::reach::block_reachable;
use crate::report::{Check, Endpoint, ValidationReport, Violation};

/// Which optional checks to run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidatorConfig {
    /// Report starts and goals not aligned to their fleet tiling. Default: true.
    pub require_alignment: bool,
    /// Report any start footprint overlapping any goal footprint, the
    /// agent's own included. Default: true.
    pub check_start_goal_separation: bool,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            require_alignment: true,
            check_start_goal_separation: true,
        }
    }
}

/// Re-check `agents` against `grid`.
///
/// Checks run in [`Check`] order:
///
/// 1. start and goal footprints are in bounds and passable, cell by cell;
/// 2. coordinates are multiples of the cell size (optional);
/// 3. no two start footprints overlap, across all fleets;
/// 4. no two goal footprints overlap;
/// 5. no start overlaps any goal (optional);
/// 6. each goal is reachable by the agent's rigid block.
///
/// Reachability is skipped for agents whose start or goal footprint
/// already failed check 1. Diagnostic cell lists are clipped to the grid,
/// so a footprint far larger than the map still yields a small report. The result depends only on the inputs, so
/// validating twice gives equal reports.
///
/// # Examples
///
/// ```
/// use fleetgrid_core::{Agent, AgentId, BaseCoord, BaseGrid, CellSize, FleetId};
/// use fleetgrid_validate::{validate, ValidatorConfig};
///
/// let grid = BaseGrid::from_rows(3, 1, &[".@."]).unwrap();
/// let agent = Agent {
///     id: AgentId(0),
///     fleet: FleetId(0),
///     cell_size: CellSize::ONE,
///     start: BaseCoord::new(0, 0),
///     goal: BaseCoord::new(2, 0),
/// };
/// let report = validate(&grid, &[agent], &ValidatorConfig::default());
/// assert!(!report.ok());
/// assert!(report.to_string().contains("goal unreachable"));
/// ```
pub fn validate(grid: &BaseGrid, agents: &[Agent], config: &ValidatorConfig) -> ValidationReport {
    let mut violations = Vec::new();

    // 1. Footprints.
    let mut endpoints_ok = vec![true; agents.len()];
    for (endpoint, pick) in [
        (Endpoint::Start, Agent::start_footprint as fn(&Agent) -> Footprint),
        (Endpoint::Goal, Agent::goal_footprint),
    ] {
        for (i, a) in agents.iter().enumerate() {
            let footprint = pick(a);
            let cells = grid.blocked_cells(&footprint);
            if !cells.is_empty() {
                endpoints_ok[i] = false;
                violations.push(Violation::BlockedFootprint {
                    agent: a.id,
                    endpoint,
                    footprint,
                    cells,
                });
            }
        }
    }

    // 2. Alignment.
    if config.require_alignment {
        for a in agents {
            for (endpoint, coord) in [(Endpoint::Start, a.start), (Endpoint::Goal, a.goal)] {
                if !coord.is_aligned(a.cell_size) {
                    violations.push(Violation::Misaligned {
                        agent: a.id,
                        endpoint,
                        coord,
                        cell_size: a.cell_size,
                    });
                }
            }
        }
    }

    // 3-4. Pairwise overlaps within starts, then within goals.
    for (check, pick) in [
        (Check::StartOverlap, Agent::start_footprint as fn(&Agent) -> Footprint),
        (Check::GoalOverlap, Agent::goal_footprint),
    ] {
        for (i, a) in agents.iter().enumerate() {
            for b in &agents[i + 1..] {
                let (fa, fb) = (pick(a), pick(b));
                if fa.intersects(&fb) {
                    let cells = fa.overlap_within(&fb, grid.width(), grid.height());
                    violations.push(Violation::FootprintOverlap {
                        check,
                        first: a.id,
                        second: b.id,
                        cells,
                    });
                }
            }
        }
    }

    // 5. Starts against goals.
    if config.check_start_goal_separation {
        for a in agents {
            for b in agents {
                let (start, goal) = (a.start_footprint(), b.goal_footprint());
                if start.intersects(&goal) {
                    let cells = start.overlap_within(&goal, grid.width(), grid.height());
                    violations.push(Violation::FootprintOverlap {
                        check: Check::StartGoalOverlap,
                        first: a.id,
                        second: b.id,
                        cells,
                    });
                }
            }
        }
    }

    // 6. Reachability.
    for (a, &ok) in agents.iter().zip(&endpoints_ok) {
        if !ok {
            continue;
        }
        let reachable = block_reachable(grid, a.cell_size, a.start, a.goal);
        log::debug!(
            "agent {} cs={}: {} -> {} {}",
            a.id,
            a.cell_size,
            a.start,
            a.goal,
            if reachable { "reachable" } else { "unreachable" }
        );
        if !reachable {
            violations.push(Violation::Unreachable {
                agent: a.id,
                start: a.start,
                goal: a.goal,
                cell_size: a.cell_size,
            });
        }
    }

    for v in &violations {
        log::warn!("[{}] {v}", v.check());
    }
    let report = ValidationReport::new(agents.len(), violations);
    log::info!(
        "validated {} agents on {}x{} grid: {}",
        agents.len(),
        grid.width(),
        grid.height(),
        if report.ok() { "ok" } else { "FAILED" }
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use fleetgrid_core::{AgentId, BaseCoord, BlockCause};
    use fleetgrid_test_utils::{agent, ascii_grid, open_grid, wall_with_door};

    fn checks(report: &ValidationReport) -> Vec<Check> {
        report.violations().iter().map(Violation::check).collect()
    }

    // ── Footprints and alignment ────────────────────────────────

    #[test]
    fn clean_scenario_passes() {
        let grid = open_grid(8, 8);
        let agents = [agent(0, 2, (0, 0), (6, 6)), agent(1, 1, (3, 0), (0, 7))];
        let report = validate(&grid, &agents, &ValidatorConfig::default());
        assert!(report.ok(), "{report}");
        assert_eq!(report.agents_checked(), 2);
    }

    #[test]
    fn blocked_cells_are_listed_with_cause() {
        let grid = ascii_grid(&[
            ".........", //
            ".@.......", //
            ".........",
        ]);
        let agents = [agent(0, 3, (1, 1), (6, 0))];
        let report = validate(&grid, &agents, &ValidatorConfig::default());
        match &report.violations()[0] {
            Violation::BlockedFootprint {
                endpoint: Endpoint::Start,
                cells,
                ..
            } => {
                assert_eq!(cells.len(), 2);
                assert_eq!(cells[0].cause, BlockCause::Wall);
                assert_eq!(cells[1].coord, BaseCoord::new(1, 3));
                assert_eq!(cells[1].cause, BlockCause::OutOfBounds);
            }
            other => panic!("expected BlockedFootprint, got {other:?}"),
        }
        // Misaligned start too; reachability skipped.
        assert_eq!(checks(&report), vec![Check::StartFootprint, Check::Alignment]);
    }

    #[test]
    fn misalignment_is_optional() {
        let grid = open_grid(8, 8);
        let agents = [agent(0, 2, (1, 0), (4, 4))];
        let strict = validate(&grid, &agents, &ValidatorConfig::default());
        assert_eq!(checks(&strict), vec![Check::Alignment]);
        assert_eq!(
            strict.violations()[0].to_string(),
            "agent 0: start (1,0) not aligned to cs=2"
        );

        let lax = ValidatorConfig {
            require_alignment: false,
            ..ValidatorConfig::default()
        };
        assert!(validate(&grid, &agents, &lax).ok());
    }

    #[test]
    fn oversized_agent_gives_a_bounded_report() {
        let grid = open_grid(10, 10);
        let agents = [agent(0, 3000, (0, 0), (0, 0)), agent(1, 1, (3, 3), (9, 9))];
        let report = validate(&grid, &agents, &ValidatorConfig::default());
        assert_eq!(
            checks(&report),
            vec![
                Check::StartFootprint,
                Check::GoalFootprint,
                Check::StartOverlap,
                Check::GoalOverlap,
                Check::StartGoalOverlap,
                Check::StartGoalOverlap,
                Check::StartGoalOverlap,
            ]
        );
        let records: usize = report
            .violations()
            .iter()
            .map(|v| match v {
                Violation::BlockedFootprint { cells, .. } => cells.len(),
                Violation::FootprintOverlap { cells, .. } => cells.len(),
                _ => 0,
            })
            .sum();
        // Own start/goal overlap is the whole 10x10 grid; every other
        // violation carries a single record.
        assert_eq!(records, 100 + 6);
        assert!(report.to_string().contains("(10,0) (out of bounds)"));
    }

    // ── Overlaps ────────────────────────────────────────────────

    #[test]
    fn cross_fleet_start_overlap_reports_exact_cells() {
        let grid = open_grid(8, 8);
        let agents = [agent(0, 3, (0, 0), (3, 3)), agent(1, 1, (2, 2), (7, 7))];
        let report = validate(&grid, &agents, &ValidatorConfig::default());
        assert_eq!(checks(&report), vec![Check::StartOverlap]);
        match &report.violations()[0] {
            Violation::FootprintOverlap {
                first,
                second,
                cells,
                ..
            } => {
                assert_eq!((*first, *second), (AgentId(0), AgentId(1)));
                assert_eq!(cells, &vec![BaseCoord::new(2, 2)]);
            }
            other => panic!("expected FootprintOverlap, got {other:?}"),
        }
    }

    #[test]
    fn goal_overlap_detected() {
        let grid = open_grid(8, 8);
        let agents = [agent(0, 2, (0, 0), (4, 4)), agent(1, 2, (0, 6), (4, 4))];
        let report = validate(&grid, &agents, &ValidatorConfig::default());
        assert_eq!(checks(&report), vec![Check::GoalOverlap]);
        assert_eq!(report.agents_with_violations(), vec![AgentId(0), AgentId(1)]);
    }

    #[test]
    fn start_on_other_goal_is_optional() {
        let grid = open_grid(6, 1);
        let agents = [agent(0, 1, (0, 0), (5, 0)), agent(1, 1, (5, 0), (2, 0))];
        let report = validate(&grid, &agents, &ValidatorConfig::default());
        assert_eq!(checks(&report), vec![Check::StartGoalOverlap]);
        assert_eq!(
            report.violations()[0].to_string(),
            "agent 1 start overlaps agent 0 goal at (5,0)"
        );

        let lax = ValidatorConfig {
            check_start_goal_separation: false,
            ..ValidatorConfig::default()
        };
        assert!(validate(&grid, &agents, &lax).ok());
    }

    // ── Reachability ────────────────────────────────────────────

    #[test]
    fn closed_door_makes_goal_unreachable() {
        let open = wall_with_door(10, 10, 5, 5..6);
        let closed = wall_with_door(10, 10, 5, 0..0);
        let agents = [agent(0, 1, (0, 0), (9, 9)), agent(1, 1, (9, 0), (0, 9))];

        assert!(validate(&open, &agents, &ValidatorConfig::default()).ok());

        let report = validate(&closed, &agents, &ValidatorConfig::default());
        assert!(!report.ok());
        assert_eq!(report.by_check(Check::Reachability).count(), 2);
        assert!(report.to_string().contains("goal unreachable"));
    }

    #[test]
    fn unreachable_for_large_block_only() {
        let grid = wall_with_door(10, 10, 5, 5..6);
        let agents = [agent(0, 2, (0, 0), (6, 6)), agent(1, 1, (0, 4), (9, 4))];
        let report = validate(&grid, &agents, &ValidatorConfig::default());
        assert_eq!(report.agents_with_violations(), vec![AgentId(0)]);
        assert_eq!(checks(&report), vec![Check::Reachability]);
    }

    #[test]
    fn validation_is_idempotent() {
        let grid = wall_with_door(10, 10, 5, 0..0);
        let agents = [
            agent(0, 2, (0, 0), (6, 6)),
            agent(1, 1, (1, 1), (9, 0)),
            agent(2, 3, (3, 3), (7, 0)),
        ];
        let config = ValidatorConfig::default();
        let first = validate(&grid, &agents, &config);
        let second = validate(&grid, &agents, &config);
        assert_eq!(first, second);
        assert_eq!(first.to_string(), second.to_string());
    }
}
