use cumulus_core::constraints;
use cumulus_core::variables::DomainId;
use cumulus_core::CumulativeOptions;
use cumulus_core::TestSolver;
use itertools::Itertools;
use rand::rngs::SmallRng;
use rand::Rng;
use rand::SeedableRng;

use crate::init_logging;
use crate::set_up_cumulative_state;
use crate::METHODS;

const NUMBER_OF_INSTANCES: usize = 60;

#[derive(Debug, Clone)]
struct Instance {
    /// For every task its start domain, duration and resource usage
    tasks: Vec<((i32, i32), i32, i32)>,
    capacity: i32,
}

impl Instance {
    fn random(rng: &mut SmallRng, max_tasks: usize, max_start: i32) -> Instance {
        let number_of_tasks = rng.gen_range(1..=max_tasks);
        let tasks = (0..number_of_tasks)
            .map(|_| {
                let lower_bound = rng.gen_range(0..=max_start);
                let upper_bound = rng.gen_range(lower_bound..=max_start);
                (
                    (lower_bound, upper_bound),
                    rng.gen_range(0..=4),
                    rng.gen_range(0..=3),
                )
            })
            .collect();

        Instance {
            tasks,
            capacity: rng.gen_range(1..=4),
        }
    }

    /// Whether the resource is overloaded at some time point when every task `i` starts at
    /// `starts[i]`.
    fn is_overloaded(&self, starts: &[i32]) -> bool {
        let horizon = starts
            .iter()
            .zip(self.tasks.iter())
            .map(|(start, (_, duration, _))| start + duration)
            .max()
            .unwrap_or(0);

        (0..horizon).any(|time| {
            let usage = starts
                .iter()
                .zip(self.tasks.iter())
                .filter(|&(&start, &(_, duration, _))| start <= time && time < start + duration)
                .map(|(_, &(_, _, resource_usage))| resource_usage)
                .sum::<i32>();
            usage > self.capacity
        })
    }

    /// All assignments of the start times which do not overload the resource.
    fn solutions(&self) -> Vec<Vec<i32>> {
        let mut solutions = Vec::new();
        let mut starts = Vec::with_capacity(self.tasks.len());
        self.enumerate(&mut starts, &mut solutions);
        solutions
    }

    fn enumerate(&self, starts: &mut Vec<i32>, solutions: &mut Vec<Vec<i32>>) {
        if starts.len() == self.tasks.len() {
            if !self.is_overloaded(starts) {
                solutions.push(starts.clone());
            }
            return;
        }

        let ((lower_bound, upper_bound), _, _) = self.tasks[starts.len()];
        for start in lower_bound..=upper_bound {
            starts.push(start);
            self.enumerate(starts, solutions);
            let _ = starts.pop();
        }
    }
}

#[test]
fn conflicts_on_fixed_tasks_match_the_resource_profile() {
    let mut rng = SmallRng::seed_from_u64(42);

    for _ in 0..NUMBER_OF_INSTANCES {
        let instance = Instance::random(&mut rng, 6, 10);
        let starts = instance
            .tasks
            .iter()
            .map(|&((lower_bound, _), _, _)| lower_bound)
            .collect::<Vec<_>>();
        let fixed_tasks = instance
            .tasks
            .iter()
            .zip(starts.iter())
            .map(|(&(_, duration, resource_usage), &start)| {
                ((start, start), duration, resource_usage)
            })
            .collect::<Vec<_>>();

        for method in METHODS {
            let (_, result, _) = set_up_cumulative_state(&fixed_tasks, instance.capacity, method);
            assert_eq!(
                result.is_err(),
                instance.is_overloaded(&starts),
                "{method:?} on {fixed_tasks:?} with capacity {}",
                instance.capacity
            );
        }
    }
}

#[test]
fn no_solution_is_removed() {
    let mut rng = SmallRng::seed_from_u64(7);

    for _ in 0..NUMBER_OF_INSTANCES {
        let instance = Instance::random(&mut rng, 4, 6);
        let solutions = instance.solutions();

        for method in METHODS {
            let (solver, result, starts) =
                set_up_cumulative_state(&instance.tasks, instance.capacity, method);

            let Ok(_) = result else {
                assert!(
                    solutions.is_empty(),
                    "{method:?} reported a conflict on {instance:?} which has a solution"
                );
                continue;
            };

            for solution in solutions.iter() {
                for (&start, &value) in starts.iter().zip(solution.iter()) {
                    assert!(
                        solver.contains(start, value),
                        "{method:?} removed the solution {solution:?} of {instance:?}"
                    );
                }
            }
        }
    }
}

#[test]
fn propagation_only_shrinks_domains_and_reaches_a_fixpoint() {
    let mut rng = SmallRng::seed_from_u64(1);

    for _ in 0..NUMBER_OF_INSTANCES {
        let instance = Instance::random(&mut rng, 6, 12);

        for method in METHODS {
            let (mut solver, result, starts) =
                set_up_cumulative_state(&instance.tasks, instance.capacity, method);
            let Ok(mut propagator) = result else {
                continue;
            };

            for (&start, &((lower_bound, upper_bound), _, _)) in
                starts.iter().zip(instance.tasks.iter())
            {
                assert!(lower_bound <= solver.lower_bound(start));
                assert!(solver.upper_bound(start) <= upper_bound);
            }

            let domains = domains_of(&solver, &starts);
            let num_domain_changes = solver.num_domain_changes();
            solver
                .propagate(&mut propagator)
                .expect("a fixpoint does not become inconsistent");
            solver
                .propagate_from_scratch(&propagator)
                .expect("a fixpoint does not become inconsistent");

            assert_eq!(solver.num_domain_changes(), num_domain_changes);
            assert_eq!(domains_of(&solver, &starts), domains);
        }
    }
}

#[test]
fn optional_tasks_are_only_made_absent_when_they_cannot_fit() {
    init_logging();
    let mut rng = SmallRng::seed_from_u64(3);

    for _ in 0..NUMBER_OF_INSTANCES {
        let instance = Instance::random(&mut rng, 4, 6);
        let mut solver = TestSolver::default();

        let starts = instance
            .tasks
            .iter()
            .map(|&((lower_bound, upper_bound), _, _)| solver.new_variable(lower_bound, upper_bound))
            .collect::<Vec<_>>();
        // The first task is optional, all others are present
        let presences = (0..instance.tasks.len())
            .map(|index| {
                if index == 0 {
                    solver.new_variable(0, 1)
                } else {
                    solver.new_variable(1, 1)
                }
            })
            .collect::<Vec<_>>();

        let propagator = constraints::cumulative_optional(
            starts.clone(),
            instance.tasks.iter().map(|&(_, duration, _)| duration),
            instance.tasks.iter().map(|&(_, _, resource_usage)| resource_usage),
            presences.clone(),
            instance.capacity,
            CumulativeOptions::default(),
        )
        .expect("same lengths");

        let Ok(_) = solver.new_propagator(propagator) else {
            continue;
        };

        if solver.upper_bound(presences[0]) == 0 {
            assert!(
                instance.solutions().is_empty(),
                "the optional task of {instance:?} was made absent although it fits"
            );
        }
    }
}

/// An instance in which the durations, the resource usages and the capacity are variables as
/// well; every task `i` is described by the domains of its start, duration and resource usage.
#[derive(Debug, Clone)]
struct VariableInstance {
    tasks: Vec<[(i32, i32); 3]>,
    capacity: (i32, i32),
}

impl VariableInstance {
    fn random(rng: &mut SmallRng, max_tasks: usize) -> VariableInstance {
        let number_of_tasks = rng.gen_range(1..=max_tasks);
        let mut domain = |max_lower_bound: i32, max_width: i32| {
            let lower_bound = rng.gen_range(0..=max_lower_bound);
            (lower_bound, lower_bound + rng.gen_range(0..=max_width))
        };

        let tasks = (0..number_of_tasks)
            .map(|_| [domain(4, 3), domain(3, 2), domain(2, 1)])
            .collect();

        VariableInstance {
            tasks,
            capacity: domain(2, 2),
        }
    }

    /// The domains of all variables: the start, duration and resource usage of every task,
    /// followed by the capacity.
    fn domains(&self) -> Vec<(i32, i32)> {
        self.tasks
            .iter()
            .flatten()
            .copied()
            .chain(std::iter::once(self.capacity))
            .collect()
    }

    /// Whether the assignment, ordered as [`VariableInstance::domains`], overloads the resource.
    fn is_overloaded(values: &[i32]) -> bool {
        let (capacity, tasks) = values.split_last().expect("the capacity is a variable");
        let tasks = tasks.chunks_exact(3).collect::<Vec<_>>();

        tasks
            .iter()
            .filter(|task| task[1] > 0)
            .any(|running| {
                let time = running[0];
                let usage = tasks
                    .iter()
                    .filter(|task| task[0] <= time && time < task[0] + task[1])
                    .map(|task| task[2])
                    .sum::<i32>();
                usage > *capacity
            })
    }

    fn solutions(&self) -> Vec<Vec<i32>> {
        self.domains()
            .into_iter()
            .map(|(lower_bound, upper_bound)| lower_bound..=upper_bound)
            .multi_cartesian_product()
            .filter(|values| !VariableInstance::is_overloaded(values))
            .collect()
    }
}

#[test]
fn variable_durations_resource_usages_and_capacity_keep_every_solution() {
    init_logging();
    let mut rng = SmallRng::seed_from_u64(11);

    for _ in 0..40 {
        let instance = VariableInstance::random(&mut rng, 3);
        let solutions = instance.solutions();

        for method in METHODS {
            for allow_holes_in_domain in [false, true] {
                let mut solver = TestSolver::default();
                let variables = instance
                    .domains()
                    .into_iter()
                    .map(|(lower_bound, upper_bound)| solver.new_variable(lower_bound, upper_bound))
                    .collect::<Vec<_>>();
                let (capacity, tasks) = variables.split_last().expect("the capacity is a variable");

                let propagator = constraints::cumulative_with_options(
                    tasks.iter().step_by(3).copied(),
                    tasks.iter().skip(1).step_by(3).copied(),
                    tasks.iter().skip(2).step_by(3).copied(),
                    *capacity,
                    CumulativeOptions::new(method, allow_holes_in_domain, true, true),
                )
                .expect("same lengths");

                let Ok(mut propagator) = solver.new_propagator(propagator) else {
                    assert!(
                        solutions.is_empty(),
                        "{method:?} reported a conflict on {instance:?} which has a solution"
                    );
                    continue;
                };

                for solution in solutions.iter() {
                    for (&variable, &value) in variables.iter().zip(solution.iter()) {
                        assert!(
                            solver.contains(variable, value),
                            "{method:?} (holes: {allow_holes_in_domain}) removed the solution \
                             {solution:?} of {instance:?}"
                        );
                    }
                }

                for (&variable, &(lower_bound, upper_bound)) in
                    variables.iter().zip(instance.domains().iter())
                {
                    assert!(lower_bound <= solver.lower_bound(variable));
                    assert!(solver.upper_bound(variable) <= upper_bound);
                    if !allow_holes_in_domain {
                        assert_eq!(solver.domain_intervals(variable).len(), 1);
                    }
                }

                let domains = domains_of(&solver, &variables);
                let num_domain_changes = solver.num_domain_changes();
                solver
                    .propagate(&mut propagator)
                    .expect("a fixpoint does not become inconsistent");

                assert_eq!(solver.num_domain_changes(), num_domain_changes);
                assert_eq!(domains_of(&solver, &variables), domains);
            }
        }
    }
}

fn domains_of(solver: &TestSolver, starts: &[DomainId]) -> Vec<Vec<(i32, i32)>> {
    starts
        .iter()
        .map(|&start| solver.domain_intervals(start))
        .collect()
}
