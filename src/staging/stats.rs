use crate::staging::store::MetadataStore;
use crate::staging::{StagingArea, StagingLayout};
use crate::types::StagingResult;
use std::collections::BTreeMap;

/// ステージングツリーの集計
///
/// 領域別の件数は本文ファイル数、内訳はメタデータレコードから数える。
/// メタデータが欠落・破損している記事は内訳に現れないため、
/// 両者は一致しないことがある。
#[derive(Debug, Clone, Default)]
pub struct StagingStats {
    /// newディレクトリの本文ファイル数
    pub new: usize,
    /// reviewedディレクトリの本文ファイル数
    pub reviewed: usize,
    /// rejectedディレクトリの本文ファイル数
    pub rejected: usize,
    /// 全領域の合計
    pub total: usize,
    /// カテゴリ別の記事数（メタデータ基準）
    pub by_category: BTreeMap<String, usize>,
    /// 言語別の記事数（メタデータ基準）
    pub by_language: BTreeMap<String, usize>,
    /// ソース別の記事数（メタデータ基準）
    pub by_source: BTreeMap<String, usize>,
}

/// ステージングツリーを走査して集計する
pub fn collect_stats(
    layout: &StagingLayout,
    store: &MetadataStore,
) -> StagingResult<StagingStats> {
    let mut stats = StagingStats {
        new: layout.count_area(StagingArea::New),
        reviewed: layout.count_area(StagingArea::Reviewed),
        rejected: layout.count_area(StagingArea::Rejected),
        ..Default::default()
    };
    stats.total = stats.new + stats.reviewed + stats.rejected;

    for record in store.list_all()? {
        *stats.by_category.entry(record.category).or_insert(0) += 1;
        *stats.by_language.entry(record.language).or_insert(0) += 1;
        *stats.by_source.entry(record.source).or_insert(0) += 1;
    }

    Ok(stats)
}

impl std::fmt::Display for StagingStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== ステージング統計 ===")?;
        writeln!(f, "新規: {}件", self.new)?;
        writeln!(f, "承認済み: {}件", self.reviewed)?;
        writeln!(f, "却下済み: {}件", self.rejected)?;
        writeln!(f, "合計: {}件", self.total)?;

        if !self.by_category.is_empty() {
            writeln!(f, "\nカテゴリ別:")?;
            for (category, count) in &self.by_category {
                writeln!(f, "  {}: {}件", category, count)?;
            }
        }
        if !self.by_language.is_empty() {
            writeln!(f, "\n言語別:")?;
            for (language, count) in &self.by_language {
                writeln!(f, "  {}: {}件", language, count)?;
            }
        }
        if !self.by_source.is_empty() {
            writeln!(f, "\nソース別:")?;
            for (source, count) in &self.by_source {
                writeln!(f, "  {}: {}件", source, count)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::article::ArticleRecord;
    use crate::staging::workflow::StagingWorkflow;

    fn sample_record(id: &str, category: &str, language: &str) -> ArticleRecord {
        ArticleRecord::new(
            id,
            format!("記事 {}", id),
            format!("https://example.com/{}", id),
            "2025-04-07 10:00:00",
            "Example Times",
            language,
            category,
            vec![],
        )
    }

    #[test]
    fn test_collect_stats() {
        let dir = tempfile::tempdir().unwrap();
        let workflow =
            StagingWorkflow::new(dir.path().join("staging"), dir.path().join("vault")).unwrap();

        workflow
            .stage(&sample_record("a1", "journalism", "en"), "# 本文")
            .unwrap();
        workflow
            .stage(&sample_record("a2", "journalism", "ja"), "# 本文")
            .unwrap();
        workflow
            .stage(&sample_record("a3", "ngo", "en"), "# 本文")
            .unwrap();
        workflow.approve("a1").unwrap();
        workflow.reject("a3").unwrap();

        let stats = collect_stats(workflow.layout(), workflow.store()).unwrap();

        assert_eq!(stats.new, 1);
        assert_eq!(stats.reviewed, 1);
        assert_eq!(stats.rejected, 1);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.by_category.get("journalism"), Some(&2));
        assert_eq!(stats.by_category.get("ngo"), Some(&1));
        assert_eq!(stats.by_language.get("en"), Some(&2));
        assert_eq!(stats.by_source.get("Example Times"), Some(&3));

        println!("✅ 統計集計テスト成功");
    }

    #[test]
    fn test_counts_diverge_when_metadata_missing() {
        let dir = tempfile::tempdir().unwrap();
        let workflow =
            StagingWorkflow::new(dir.path().join("staging"), dir.path().join("vault")).unwrap();

        // メタデータのない本文ファイル
        std::fs::write(
            workflow
                .layout()
                .content_path(StagingArea::New, "orphan"),
            "# 孤立ノート",
        )
        .unwrap();

        let stats = collect_stats(workflow.layout(), workflow.store()).unwrap();
        assert_eq!(stats.new, 1);
        // 内訳はメタデータ基準なので空のまま
        assert!(stats.by_category.is_empty());
    }

    #[test]
    fn test_empty_tree() {
        let dir = tempfile::tempdir().unwrap();
        let workflow =
            StagingWorkflow::new(dir.path().join("staging"), dir.path().join("vault")).unwrap();

        let stats = collect_stats(workflow.layout(), workflow.store()).unwrap();
        assert_eq!(stats.total, 0);
        assert!(stats.by_source.is_empty());
    }
}
