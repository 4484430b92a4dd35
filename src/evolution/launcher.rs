use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::mpsc;

use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::{debug, info, instrument, warn};

use super::island::{EpochPlan, EpochReport, Individual, Island};
use super::options::{IslandOptions, PopulationPolicy};
use crate::breeding::Breeder;
use crate::error::{OptionExt, Result, TspError};
use crate::instance::Instance;
use crate::optimizer::{improves, prepare, Optimizer, Solution};
use crate::rng::RandomNumberGenerator;
use crate::selection::TournamentSelection;
use crate::tour::Tour;

/// Runs the island genetic algorithm on a dedicated worker pool.
///
/// The pool has exactly one thread per island and lives as long as the
/// launcher. Every epoch submits one task per island inside a pool scope; the
/// scope returning is the epoch barrier. Each task reports its best individual
/// over a channel, so the coordinator is the only owner of the per-island best
/// records and no lock is needed.
#[derive(Debug)]
pub struct IslandLauncher {
    options: IslandOptions,
    pool: ThreadPool,
    #[cfg(test)]
    fault: Option<(usize, Fault)>,
}

/// A failure forced onto one island task.
#[cfg(test)]
#[derive(Debug, Clone, Copy)]
enum Fault {
    Fail,
    Panic,
}

#[cfg(test)]
fn inject_fault(fault: Option<(usize, Fault)>, island: usize) -> Result<()> {
    match fault {
        Some((target, Fault::Fail)) if target == island => Err(TspError::EmptyPopulation),
        Some((target, Fault::Panic)) if target == island => panic!("island {island} was forced to panic"),
        _ => Ok(()),
    }
}

impl IslandLauncher {
    /// Creates a new `IslandLauncher` with the given options.
    ///
    /// # Errors
    ///
    /// - [`TspError::Configuration`] if the options fail [`IslandOptions::validate`].
    /// - [`TspError::ThreadPool`] if the worker threads cannot be spawned.
    pub fn new(options: IslandOptions) -> Result<Self> {
        options.validate()?;
        let pool = ThreadPoolBuilder::new()
            .num_threads(options.get_islands())
            .thread_name(|index| format!("island-{index}"))
            .build()
            .map_err(|e| TspError::ThreadPool(format!("rayon pool: {e}")))?;
        Ok(Self {
            options,
            pool,
            #[cfg(test)]
            fault: None,
        })
    }

    pub fn options(&self) -> &IslandOptions {
        &self.options
    }

    /// Evolves tours for `instance`, optionally seeding every island's first
    /// population with `seed`.
    ///
    /// # Returns
    ///
    /// The best individual across all islands and epochs. `history` holds the
    /// global best length after each epoch.
    ///
    /// # Errors
    ///
    /// - [`TspError::EmptyInstance`] if the instance has no cities.
    /// - [`TspError::InvalidTour`] if `seed` is not a permutation of the instance.
    /// - [`TspError::Island`] if any island fails or panics. The run is abandoned.
    /// - [`TspError::MissingIslandReport`] if an epoch ends without a report
    ///   from every island.
    #[instrument(skip_all, fields(cities = instance.len(), islands = self.options.get_islands(), epochs = self.options.get_epochs()))]
    pub fn evolve(
        &self,
        instance: &Instance,
        seed: Option<&Tour>,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Solution> {
        match seed {
            Some(seed) => {
                if let Some(done) = prepare(instance, seed)? {
                    return Ok(done);
                }
            }
            None => {
                instance.ensure_not_empty()?;
                if instance.len() == 1 {
                    warn!("single-city instance, returning the degenerate tour");
                    return Ok(Solution::degenerate());
                }
            }
        }

        let options = &self.options;
        let island_count = options.get_islands();
        let epochs = options.get_epochs();
        let breeder = Breeder::new(
            options.get_crossover_probability(),
            options.get_pmx_ratio(),
            options.get_mutation_rate(),
        );
        let selection = TournamentSelection::new(options.get_tournament_size())?;

        let mut islands: Vec<Island> = (0..island_count)
            .map(|id| Island::new(id, options.get_island_population_size(), rng.spawn()))
            .collect();
        let mut records: Vec<Option<Individual>> = vec![None; island_count];
        let mut global_best: Option<Individual> = None;
        let mut improvements = 0;
        let mut history = Vec::with_capacity(epochs);

        for epoch in 0..epochs {
            let plan = EpochPlan {
                instance,
                options,
                breeder,
                selection,
                seed: if epoch == 0 { seed } else { None },
            };

            let reports = self.run_epoch(&mut islands, &plan)?;
            for report in reports {
                debug!(
                    epoch,
                    island = report.island,
                    length = report.best.length,
                    improvements = report.improvements,
                    "island report"
                );
                let record = &mut records[report.island];
                if record.as_ref().map_or(true, |r| improves(report.best.length, r.length)) {
                    *record = Some(report.best);
                }
            }

            if epoch + 1 < epochs {
                let receivers = migrate_ring(&mut records);
                if options.get_population_policy() == PopulationPolicy::Persist {
                    for &receiver in &receivers {
                        if let Some(migrant) = &records[receiver] {
                            islands[receiver].accept_migrant(migrant);
                        }
                    }
                }
                debug!(epoch, migrations = receivers.len(), "ring migration");
            }

            let epoch_best = records
                .iter()
                .flatten()
                .min_by(|a, b| a.length.total_cmp(&b.length))
                .ok_or_else_tsp(|| TspError::MissingIslandReport {
                    expected: island_count,
                    received: 0,
                })?;
            if global_best
                .as_ref()
                .map_or(true, |best| improves(epoch_best.length, best.length))
            {
                global_best = Some(epoch_best.clone());
                improvements += 1;
            }
            let best_length = global_best.as_ref().map_or(f64::INFINITY, |b| b.length);
            history.push(best_length);
            info!(epoch = epoch + 1, best_length, "epoch finished");
        }

        let best = global_best.ok_or_else_tsp(|| {
            TspError::Other("island run finished without a best individual".to_string())
        })?;
        Ok(Solution::new(instance, best.tour).with_stats(epochs, improvements, history))
    }

    /// Runs one epoch on every island and waits for all of them.
    fn run_epoch(&self, islands: &mut [Island], plan: &EpochPlan<'_>) -> Result<Vec<EpochReport>> {
        let expected = islands.len();
        let (tx, rx) = mpsc::channel::<(usize, Result<EpochReport>)>();
        #[cfg(test)]
        let fault = self.fault;

        self.pool.scope(|scope| {
            for island in islands.iter_mut() {
                let tx = tx.clone();
                scope.spawn(move |_| {
                    let id = island.id();
                    let outcome = catch_unwind(AssertUnwindSafe(|| {
                        #[cfg(test)]
                        inject_fault(fault, id)?;
                        island.run_epoch(plan)
                    }))
                        .unwrap_or_else(|payload| {
                            Err(TspError::Island {
                                island: id,
                                message: panic_message(payload.as_ref()),
                            })
                        });
                    // The receiver outlives the scope, so a send cannot fail here.
                    let _ = tx.send((id, outcome));
                });
            }
        });
        drop(tx);

        collect_reports(expected, rx.try_iter().collect())
    }
}

impl Optimizer for IslandLauncher {
    fn optimize_with_rng(
        &self,
        instance: &Instance,
        start: Tour,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Solution> {
        self.evolve(instance, Some(&start), rng)
    }

    fn optimize_random(&self, instance: &Instance, rng: &mut RandomNumberGenerator) -> Result<Solution> {
        self.evolve(instance, None, rng)
    }
}

/// Checks that every island reported and orders the reports by island id.
///
/// A failed island fails the whole epoch; the lowest failing id wins.
pub(crate) fn collect_reports(
    expected: usize,
    mut received: Vec<(usize, Result<EpochReport>)>,
) -> Result<Vec<EpochReport>> {
    received.sort_by_key(|(id, _)| *id);
    let mut reports = Vec::with_capacity(expected);
    for (id, outcome) in received {
        let report = outcome.map_err(|e| match e {
            TspError::Island { .. } => e,
            other => TspError::Island {
                island: id,
                message: other.to_string(),
            },
        })?;
        reports.push(report);
    }

    let mut ids: Vec<usize> = reports.iter().map(|r| r.island).collect();
    ids.dedup();
    if ids.len() != expected || reports.len() != expected {
        return Err(TspError::MissingIslandReport {
            expected,
            received: ids.len(),
        });
    }
    Ok(reports)
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "island task panicked".to_string()
    }
}

/// Passes each island's best record to the next island in ring order.
///
/// Islands are visited in id order and island `i` sends to `(i + 1) % k`. The
/// receiver's record is replaced only if the incoming individual is strictly
/// shorter, so no record ever gets worse. A record updated earlier in the
/// same pass is forwarded with its new value.
///
/// Returns the ids of the islands whose record was replaced.
pub fn migrate_ring(records: &mut [Option<Individual>]) -> Vec<usize> {
    let k = records.len();
    let mut receivers = Vec::new();
    for i in 0..k {
        let next = (i + 1) % k;
        if next == i {
            continue;
        }
        let Some(migrant) = records[i].clone() else {
            continue;
        };
        let accept = records[next]
            .as_ref()
            .map_or(true, |current| improves(migrant.length, current.length));
        if accept {
            records[next] = Some(migrant);
            receivers.push(next);
        }
    }
    receivers
}
