use crate::error::{MediaSplitterError, Result};
use crate::types::{ChunkPlan, ChunkSpec, FileProbe, PlanMode};
use std::path::Path;
use tracing::debug;

pub struct ChunkPlanner;

impl ChunkPlanner {
    /// Computes the ordered chunks for a probed file. Nothing is returned
    /// unless the whole plan is valid.
    pub fn plan(
        probe: &FileProbe,
        seconds_per_chunk: u32,
        output_dir: &Path,
        mode: &PlanMode,
    ) -> Result<ChunkPlan> {
        let (stem, extension) = Self::split_file_name(&probe.input_file_name)?;
        let total = probe.total_duration_secs;
        let full_count = Self::full_chunk_count(total, seconds_per_chunk);
        let step = f64::from(seconds_per_chunk);

        // (first absolute 0-based index, first start time, count)
        let (first_index, first_start, count) = match mode {
            PlanMode::Full => (0u32, 0.0, full_count),
            PlanMode::FromOffset {
                start_secs,
                max_chunks,
            } => {
                if *start_secs > total as f64 {
                    return Err(MediaSplitterError::StartPositionBeyondDuration {
                        start_secs: *start_secs,
                        duration_secs: total,
                    });
                }
                let duration_left = total as f64 - start_secs;
                let available = (duration_left / step).floor() as u32 + 1;
                (0, *start_secs, Self::cap(available, *max_chunks))
            }
            PlanMode::FromIndex {
                start_index,
                max_chunks,
            } => {
                if *start_index >= full_count {
                    return Err(MediaSplitterError::StartIndexOutOfRange {
                        index: *start_index,
                        total: full_count,
                    });
                }
                let available = full_count - start_index;
                (
                    *start_index,
                    f64::from(*start_index) * step,
                    Self::cap(available, *max_chunks),
                )
            }
        };

        let chunks = (0..count)
            .map(|i| {
                let index = first_index + i + 1;
                ChunkSpec {
                    index,
                    start_secs: first_start + f64::from(i) * step,
                    duration_secs: seconds_per_chunk,
                    output_path: output_dir.join(format!("{}_{:04}.{}", stem, index, extension)),
                }
            })
            .collect::<Vec<_>>();

        debug!(
            "Planned {} chunks of {}s over {}s ({:?})",
            chunks.len(),
            seconds_per_chunk,
            total,
            mode
        );

        Ok(ChunkPlan {
            total_duration_secs: total,
            seconds_per_chunk,
            chunks,
        })
    }

    /// `ceil(total / seconds_per_chunk)`
    pub fn full_chunk_count(total_duration_secs: u64, seconds_per_chunk: u32) -> u32 {
        let per = u64::from(seconds_per_chunk);
        u32::try_from(total_duration_secs.div_ceil(per)).unwrap_or(u32::MAX)
    }

    fn cap(available: u32, requested: Option<u32>) -> u32 {
        requested.map_or(available, |r| r.min(available))
    }

    /// Splits a file name at its first `.` into stem and extension.
    pub fn split_file_name(name: &str) -> Result<(&str, &str)> {
        match name.split_once('.') {
            Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => Ok((stem, ext)),
            _ => Err(MediaSplitterError::InvalidInputName {
                name: name.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn probe(total: u64) -> FileProbe {
        FileProbe {
            total_duration_secs: total,
            input_file_name: "episode.mp3".to_string(),
        }
    }

    fn starts(plan: &ChunkPlan) -> Vec<f64> {
        plan.chunks.iter().map(|c| c.start_secs).collect()
    }

    fn indices(plan: &ChunkPlan) -> Vec<u32> {
        plan.chunks.iter().map(|c| c.index).collect()
    }

    #[test]
    fn test_full_split_does_not_truncate_last_chunk() {
        let plan = ChunkPlanner::plan(&probe(125), 30, Path::new("/out"), &PlanMode::Full).unwrap();

        assert_eq!(plan.len(), 5);
        assert_eq!(starts(&plan), vec![0.0, 30.0, 60.0, 90.0, 120.0]);
        let last = plan.chunks.last().unwrap();
        assert_eq!(last.duration_secs, 30);
        assert_eq!(last.output_path, PathBuf::from("/out/episode_0005.mp3"));
    }

    #[test]
    fn test_full_split_exact_multiple_and_empty() {
        let plan = ChunkPlanner::plan(&probe(120), 30, Path::new("/out"), &PlanMode::Full).unwrap();
        assert_eq!(plan.len(), 4);

        let plan = ChunkPlanner::plan(&probe(0), 30, Path::new("/out"), &PlanMode::Full).unwrap();
        assert!(plan.is_empty());
    }

    #[test]
    fn test_offset_mode() {
        let mode = PlanMode::FromOffset {
            start_secs: 50.0,
            max_chunks: Some(10),
        };
        let plan = ChunkPlanner::plan(&probe(100), 20, Path::new("/out"), &mode).unwrap();

        assert_eq!(starts(&plan), vec![50.0, 70.0, 90.0]);
        assert_eq!(indices(&plan), vec![1, 2, 3]);
    }

    #[test]
    fn test_offset_mode_respects_requested_count() {
        let mode = PlanMode::FromOffset {
            start_secs: 12.5,
            max_chunks: Some(2),
        };
        let plan = ChunkPlanner::plan(&probe(100), 20, Path::new("/out"), &mode).unwrap();
        assert_eq!(starts(&plan), vec![12.5, 32.5]);
    }

    #[test]
    fn test_offset_beyond_duration() {
        let mode = PlanMode::FromOffset {
            start_secs: 100.5,
            max_chunks: None,
        };
        let err = ChunkPlanner::plan(&probe(100), 20, Path::new("/out"), &mode).unwrap_err();
        assert!(matches!(
            err,
            MediaSplitterError::StartPositionBeyondDuration { .. }
        ));
    }

    #[test]
    fn test_offset_at_end_yields_single_chunk() {
        let mode = PlanMode::FromOffset {
            start_secs: 100.0,
            max_chunks: None,
        };
        let plan = ChunkPlanner::plan(&probe(100), 20, Path::new("/out"), &mode).unwrap();
        assert_eq!(starts(&plan), vec![100.0]);
    }

    #[test]
    fn test_index_mode() {
        let mode = PlanMode::FromIndex {
            start_index: 3,
            max_chunks: Some(10),
        };
        let plan = ChunkPlanner::plan(&probe(125), 30, Path::new("/out"), &mode).unwrap();

        assert_eq!(indices(&plan), vec![4, 5]);
        assert_eq!(starts(&plan), vec![90.0, 120.0]);
        assert_eq!(
            plan.output_paths(),
            vec![
                PathBuf::from("/out/episode_0004.mp3"),
                PathBuf::from("/out/episode_0005.mp3"),
            ]
        );
    }

    #[test]
    fn test_index_out_of_range() {
        let mode = PlanMode::FromIndex {
            start_index: 5,
            max_chunks: None,
        };
        let err = ChunkPlanner::plan(&probe(125), 30, Path::new("/out"), &mode).unwrap_err();
        assert!(matches!(
            err,
            MediaSplitterError::StartIndexOutOfRange { index: 5, total: 5 }
        ));
    }

    #[test]
    fn test_output_paths_are_unique() {
        let plan = ChunkPlanner::plan(&probe(3600), 7, Path::new("/out"), &PlanMode::Full).unwrap();
        let mut paths = plan.output_paths();
        let before = paths.len();
        paths.sort();
        paths.dedup();
        assert_eq!(paths.len(), before);
    }

    #[test]
    fn test_split_file_name() {
        assert_eq!(
            ChunkPlanner::split_file_name("song.mp3").unwrap(),
            ("song", "mp3")
        );
        assert_eq!(
            ChunkPlanner::split_file_name("live.set.flac").unwrap(),
            ("live", "set.flac")
        );
        assert!(ChunkPlanner::split_file_name("README").is_err());
        assert!(ChunkPlanner::split_file_name(".hidden").is_err());
    }
}
