// ==========================================
// 考试成绩分析看板 - 领域类型定义
// ==========================================
// 职责: 等级体系、分数段、排序方向
// 红线: 等级顺序与及格线固定,不可配置
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

/// 空等级在分布与最高/最低分展示中的占位标签
pub const UNGRADED_LABEL: &str = "N/A";

// ==========================================
// 标准等级 (Canonical Grade)
// ==========================================
// 排名: A+ 最高, F 最低; C 及以上为及格
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CanonicalGrade {
    #[serde(rename = "A+")]
    APlus,
    #[serde(rename = "A")]
    A,
    #[serde(rename = "A-")]
    AMinus,
    #[serde(rename = "B+")]
    BPlus,
    #[serde(rename = "B")]
    B,
    #[serde(rename = "B-")]
    BMinus,
    #[serde(rename = "C+")]
    CPlus,
    #[serde(rename = "C")]
    C,
    #[serde(rename = "C-")]
    CMinus,
    #[serde(rename = "D")]
    D,
    #[serde(rename = "F")]
    F,
}

impl CanonicalGrade {
    /// 标准顺序（A+ → F）
    pub const ALL: [CanonicalGrade; 11] = [
        CanonicalGrade::APlus,
        CanonicalGrade::A,
        CanonicalGrade::AMinus,
        CanonicalGrade::BPlus,
        CanonicalGrade::B,
        CanonicalGrade::BMinus,
        CanonicalGrade::CPlus,
        CanonicalGrade::C,
        CanonicalGrade::CMinus,
        CanonicalGrade::D,
        CanonicalGrade::F,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            CanonicalGrade::APlus => "A+",
            CanonicalGrade::A => "A",
            CanonicalGrade::AMinus => "A-",
            CanonicalGrade::BPlus => "B+",
            CanonicalGrade::B => "B",
            CanonicalGrade::BMinus => "B-",
            CanonicalGrade::CPlus => "C+",
            CanonicalGrade::C => "C",
            CanonicalGrade::CMinus => "C-",
            CanonicalGrade::D => "D",
            CanonicalGrade::F => "F",
        }
    }

    /// 按原始标签精确匹配（区分大小写,与成绩表一致）
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|g| g.label() == label)
    }

    /// 及格判定: C 及以上
    pub fn is_passing(&self) -> bool {
        *self <= CanonicalGrade::C
    }

    /// 图表主色
    pub fn color(&self) -> &'static str {
        match self {
            CanonicalGrade::APlus => "#15803d",
            CanonicalGrade::A => "#059669",
            CanonicalGrade::AMinus => "#0d9488",
            CanonicalGrade::BPlus => "#2563eb",
            CanonicalGrade::B => "#4f46e5",
            CanonicalGrade::BMinus => "#7c3aed",
            CanonicalGrade::CPlus => "#d97706",
            CanonicalGrade::C => "#ea580c",
            CanonicalGrade::CMinus => "#c2410c",
            CanonicalGrade::D => "#dc2626",
            CanonicalGrade::F => "#b91c1c",
        }
    }

    /// 等级卡片背景色
    pub fn background(&self) -> &'static str {
        match self {
            CanonicalGrade::APlus => "#dcfce7",
            CanonicalGrade::A => "#d1fae5",
            CanonicalGrade::AMinus => "#ccfbf1",
            CanonicalGrade::BPlus => "#dbeafe",
            CanonicalGrade::B => "#e0e7ff",
            CanonicalGrade::BMinus => "#ede9fe",
            CanonicalGrade::CPlus => "#fef3c7",
            CanonicalGrade::C => "#fed7aa",
            CanonicalGrade::CMinus => "#ffedd5",
            CanonicalGrade::D => "#fee2e2",
            CanonicalGrade::F => "#fecaca",
        }
    }

    /// 表格徽章 CSS 类名
    pub fn css_class(&self) -> &'static str {
        match self {
            CanonicalGrade::APlus => "grade-A-plus",
            CanonicalGrade::A => "grade-A",
            CanonicalGrade::AMinus => "grade-A-minus",
            CanonicalGrade::BPlus => "grade-B-plus",
            CanonicalGrade::B => "grade-B",
            CanonicalGrade::BMinus => "grade-B-minus",
            CanonicalGrade::CPlus => "grade-C-plus",
            CanonicalGrade::C => "grade-C",
            CanonicalGrade::CMinus => "grade-C-minus",
            CanonicalGrade::D => "grade-D",
            CanonicalGrade::F => "grade-F",
        }
    }
}

impl fmt::Display for CanonicalGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// 非标准等级的中性配色
pub const NEUTRAL_GRADE_COLOR: &str = "#6c757d";
pub const NEUTRAL_GRADE_BACKGROUND: &str = "#f4f6f9";
/// 非标准等级沿用 C 的徽章样式
pub const FALLBACK_GRADE_CLASS: &str = "grade-C";

// ==========================================
// 分数段 (Marks Range)
// ==========================================
// 左闭区间,按下界归档: 90 → "90-100", 89 → "80-89"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MarksRange {
    #[serde(rename = "90-100")]
    From90,
    #[serde(rename = "80-89")]
    From80,
    #[serde(rename = "70-79")]
    From70,
    #[serde(rename = "60-69")]
    From60,
    #[serde(rename = "50-59")]
    From50,
    #[serde(rename = "40-49")]
    From40,
    #[serde(rename = "Below 40")]
    Below40,
}

impl MarksRange {
    /// 展示顺序（高 → 低）
    pub const ALL: [MarksRange; 7] = [
        MarksRange::From90,
        MarksRange::From80,
        MarksRange::From70,
        MarksRange::From60,
        MarksRange::From50,
        MarksRange::From40,
        MarksRange::Below40,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MarksRange::From90 => "90-100",
            MarksRange::From80 => "80-89",
            MarksRange::From70 => "70-79",
            MarksRange::From60 => "60-69",
            MarksRange::From50 => "50-59",
            MarksRange::From40 => "40-49",
            MarksRange::Below40 => "Below 40",
        }
    }

    /// 归档: 覆盖整个整数域,超过 100 的分数也进入最高段
    pub fn for_marks(marks: i64) -> Self {
        match marks {
            m if m >= 90 => MarksRange::From90,
            m if m >= 80 => MarksRange::From80,
            m if m >= 70 => MarksRange::From70,
            m if m >= 60 => MarksRange::From60,
            m if m >= 50 => MarksRange::From50,
            m if m >= 40 => MarksRange::From40,
            _ => MarksRange::Below40,
        }
    }

    /// 直方图柱色
    pub fn color(&self) -> &'static str {
        match self {
            MarksRange::From90 => "#15803d",
            MarksRange::From80 => "#059669",
            MarksRange::From70 => "#0d9488",
            MarksRange::From60 => "#2563eb",
            MarksRange::From50 => "#7c3aed",
            MarksRange::From40 => "#d97706",
            MarksRange::Below40 => "#dc2626",
        }
    }
}

impl fmt::Display for MarksRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ==========================================
// 排序方向 (Sort Order)
// ==========================================
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SortOrder {
    /// 新会话的初始状态,首次切换即为降序
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::Ascending,
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::Ascending => write!(f, "ASCENDING"),
            SortOrder::Descending => write!(f, "DESCENDING"),
        }
    }
}
