/*!
Read-only access to the SQLite results store.

A run of the benchmark suite creates a `benchmark_group`. Every benchmark instance of the
run is a row of `benchmark`, joined on its id to the detail table of its benchmark
(`benchmark_<name>`, which holds the problem size) and to the measurement tables
`benchmark_duration` and `benchmark_memory`, which hold one row per replicate.
*/

use crate::series::{AggregatedSeries, RawSeries};
use crate::{NANOS_PER_MILLI, Result, ResultsError};
use log::debug;
use rusqlite::{Connection, OpenFlags, OptionalExtension, params};
use std::fmt::{Display, Formatter};
use std::path::Path;
use std::str::FromStr;

pub type GroupId = i64;
pub type BenchmarkId = i64;

/// Benchmarks with a detail table in the store.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum StoredBenchmark {
    Chameneos,
    Counting,
    PingPong,
    ForkJoinCreation,
    ForkJoinThroughput,
    Ring,
    RingStream,
}

impl StoredBenchmark {
    pub const ALL: [StoredBenchmark; 7] = [
        StoredBenchmark::Chameneos,
        StoredBenchmark::Counting,
        StoredBenchmark::ForkJoinCreation,
        StoredBenchmark::ForkJoinThroughput,
        StoredBenchmark::PingPong,
        StoredBenchmark::Ring,
        StoredBenchmark::RingStream,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            StoredBenchmark::Chameneos => "chameneos",
            StoredBenchmark::Counting => "counting",
            StoredBenchmark::PingPong => "pingpong",
            StoredBenchmark::ForkJoinCreation => "forkjoin_creation",
            StoredBenchmark::ForkJoinThroughput => "forkjoin_throughput",
            StoredBenchmark::Ring => "ring",
            StoredBenchmark::RingStream => "ringstream",
        }
    }

    /// Column of the detail table used as the x-axis of the plots.
    pub const fn size_field(self) -> &'static str {
        match self {
            StoredBenchmark::Counting => "count",
            StoredBenchmark::PingPong => "pairs",
            StoredBenchmark::Chameneos
            | StoredBenchmark::ForkJoinCreation
            | StoredBenchmark::ForkJoinThroughput
            | StoredBenchmark::Ring
            | StoredBenchmark::RingStream => "size",
        }
    }

    pub fn detail_table(self) -> String {
        format!("benchmark_{}", self.name())
    }
}

impl FromStr for StoredBenchmark {
    type Err = ResultsError;

    fn from_str(s: &str) -> Result<Self> {
        StoredBenchmark::ALL
            .into_iter()
            .find(|b| b.name() == s)
            .ok_or_else(|| ResultsError::UnknownBenchmark(s.to_owned()))
    }
}

impl Display for StoredBenchmark {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Value of the `type` column of `benchmark`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MeasurementKind {
    SizeVsTime,
    SizeVsMemory,
}

impl MeasurementKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            MeasurementKind::SizeVsTime => "size_vs_time",
            MeasurementKind::SizeVsMemory => "size_vs_memory",
        }
    }
}

pub struct ResultsStore {
    conn: Connection,
}

impl ResultsStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open_with_flags(
            path.as_ref(),
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        debug!("Opened results store {}", path.as_ref().display());
        Ok(ResultsStore { conn })
    }

    /// Most recently finished group; unfinished groups (`end` is NULL) are ignored.
    pub fn latest_group_id(&self) -> Result<GroupId> {
        self.conn
            .query_row(
                "SELECT `id` FROM benchmark_group \
                 WHERE `end` IS NOT NULL \
                 ORDER BY `end` DESC LIMIT 1",
                [],
                |row| row.get(0),
            )
            .optional()?
            .ok_or(ResultsError::NoCompletedGroup)
    }

    fn resolve_group(&self, group: Option<GroupId>) -> Result<GroupId> {
        match group {
            Some(gid) => Ok(gid),
            None => self.latest_group_id(),
        }
    }

    /// `(benchmark id, size)` of every instance of `bench` run on `system` in `group`.
    pub fn benchmark_sizes(
        &self,
        group: GroupId,
        bench: StoredBenchmark,
        system: &str,
        kind: MeasurementKind,
    ) -> Result<Vec<(BenchmarkId, u64)>> {
        // Table and column names come from `StoredBenchmark` only.
        let sql = format!(
            "SELECT benchmark.`id`, {table}.`{field}` \
             FROM benchmark \
             INNER JOIN {table} \
             ON (benchmark.`id` = {table}.`id`) \
             WHERE benchmark.`group` = ?1 AND benchmark.`name` = ?2 \
             AND benchmark.`system` = ?3 \
             AND benchmark.`type` = ?4",
            table = bench.detail_table(),
            field = bench.size_field(),
        );
        let mut statement = self.conn.prepare(&sql)?;
        let rows = statement.query_map(
            params![group, bench.name(), system, kind.as_str()],
            |row| Ok((row.get::<_, BenchmarkId>(0)?, row.get::<_, i64>(1)?)),
        )?;
        let mut id_sizes = Vec::new();
        for row in rows {
            let (id, size) = row?;
            let size =
                u64::try_from(size).map_err(|_| ResultsError::InvalidStoredSize { id, size })?;
            id_sizes.push((id, size));
        }
        Ok(id_sizes)
    }

    /// Replicate durations of a benchmark instance, in milliseconds.
    pub fn durations(&self, id: BenchmarkId) -> Result<Vec<f64>> {
        let mut statement = self.conn.prepare_cached(
            "SELECT `nanoseconds` FROM benchmark_duration WHERE `benchmark_id` = ?1",
        )?;
        let rows = statement.query_map([id], |row| row.get::<_, i64>(0))?;
        let mut durations = Vec::new();
        for nanos in rows {
            durations.push(nanos? as f64 / NANOS_PER_MILLI);
        }
        Ok(durations)
    }

    /// Replicate `(max_bytes, calls)` garbage collector figures of a benchmark instance.
    pub fn memory(&self, id: BenchmarkId) -> Result<(Vec<f64>, Vec<f64>)> {
        let mut statement = self.conn.prepare_cached(
            "SELECT `max_bytes`, `calls` FROM benchmark_memory WHERE `benchmark_id` = ?1",
        )?;
        let rows = statement.query_map([id], |row| {
            Ok((row.get::<_, i64>(0)?, row.get::<_, i64>(1)?))
        })?;
        let mut max_bytes = Vec::new();
        let mut calls = Vec::new();
        for row in rows {
            let (bytes, call_count) = row?;
            max_bytes.push(bytes as f64);
            calls.push(call_count as f64);
        }
        Ok((max_bytes, calls))
    }

    /// Time vs. size series of `system`, in milliseconds, empty sizes removed.
    pub fn fetch_time_series(
        &self,
        bench: StoredBenchmark,
        system: &str,
        group: Option<GroupId>,
    ) -> Result<AggregatedSeries> {
        let gid = self.resolve_group(group)?;
        let mut raw = RawSeries::default();
        for (id, size) in self.benchmark_sizes(gid, bench, system, MeasurementKind::SizeVsTime)? {
            raw.push(size, self.durations(id)?);
        }
        debug!("[{}] {}: {} sizes in group {}", bench, system, raw.len(), gid);
        Ok(raw.into_points())
    }

    /// Memory vs. size series of `system`, in bytes, with the mean GC call count of each size.
    pub fn fetch_memory_series(
        &self,
        bench: StoredBenchmark,
        system: &str,
        group: Option<GroupId>,
    ) -> Result<AggregatedSeries> {
        let gid = self.resolve_group(group)?;
        let mut raw = RawSeries::default();
        for (id, size) in self.benchmark_sizes(gid, bench, system, MeasurementKind::SizeVsMemory)? {
            let (max_bytes, calls) = self.memory(id)?;
            raw.push_with_calls(size, max_bytes, calls);
        }
        debug!("[{}] {}: {} sizes in group {}", bench, system, raw.len(), gid);
        let mut points = raw.into_points();
        points.mean_calls.get_or_insert_with(Vec::new);
        Ok(points)
    }

    pub fn assemble_time_data<'a, V: AsRef<str>>(
        &self,
        bench: StoredBenchmark,
        variants: &'a [V],
        group: Option<GroupId>,
    ) -> Result<Vec<(&'a V, AggregatedSeries)>> {
        let gid = self.resolve_group(group)?;
        variants
            .iter()
            .map(|v| Ok((v, self.fetch_time_series(bench, v.as_ref(), Some(gid))?)))
            .collect()
    }

    pub fn assemble_memory_data<'a, V: AsRef<str>>(
        &self,
        bench: StoredBenchmark,
        variants: &'a [V],
        group: Option<GroupId>,
    ) -> Result<Vec<(&'a V, AggregatedSeries)>> {
        let gid = self.resolve_group(group)?;
        variants
            .iter()
            .map(|v| Ok((v, self.fetch_memory_series(bench, v.as_ref(), Some(gid))?)))
            .collect()
    }
}
