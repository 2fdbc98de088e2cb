// ==========================================
// 考试成绩分析看板 - 会话管理
// ==========================================
// 职责: 持有当前上传的学生序列、统计快照、图表与排序状态
// 生命周期: create（首次成功上传）→ replace（再次成功上传）→ dispose（重置）
// 红线: 只有最新一次上传可以安装结果; 旧上传结果直接丢弃
// ==========================================

use crate::dashboard::charts::ChartSet;
use crate::domain::statistics::StatisticsSnapshot;
use crate::domain::student::{ImportedBatch, Student};
use crate::domain::types::SortOrder;
use chrono::{DateTime, Local};
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

/// 会话错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("上传已过期: ticket={ticket}, latest={latest}")]
    StaleUpload { ticket: u64, latest: u64 },
}

pub type SessionResult<T> = Result<T, SessionError>;

/// 上传凭据（每次开始上传时领取,代数单调递增）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadTicket {
    generation: u64,
}

impl UploadTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

// ==========================================
// DashboardSession - 一次成功上传对应的会话
// ==========================================
#[derive(Debug)]
pub struct DashboardSession {
    session_id: Uuid,
    batch_label: String,
    file_name: String,
    loaded_at: DateTime<Local>,
    students: Vec<Student>,
    snapshot: StatisticsSnapshot,
    charts: ChartSet,
    sort_order: SortOrder,
}

impl DashboardSession {
    /// 创建会话
    ///
    /// # 参数
    /// - batch: 导入结果（学生序列非空）
    /// - snapshot: 基于完整学生序列计算的统计快照
    /// - charts: 已渲染的图表
    pub fn create(batch: ImportedBatch, snapshot: StatisticsSnapshot, charts: ChartSet) -> Self {
        Self {
            session_id: Uuid::new_v4(),
            batch_label: batch.batch_label,
            file_name: batch.file_name,
            loaded_at: Local::now(),
            students: batch.students,
            snapshot,
            charts,
            sort_order: SortOrder::default(),
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn batch_label(&self) -> &str {
        &self.batch_label
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn loaded_at(&self) -> DateTime<Local> {
        self.loaded_at
    }

    /// 完整学生序列（导入顺序,只读）
    pub fn students(&self) -> &[Student] {
        &self.students
    }

    pub fn snapshot(&self) -> &StatisticsSnapshot {
        &self.snapshot
    }

    pub fn charts(&self) -> &ChartSet {
        &self.charts
    }

    pub fn sort_order(&self) -> SortOrder {
        self.sort_order
    }

    /// 切换排序方向,返回切换后的方向
    pub fn toggle_sort(&mut self) -> SortOrder {
        self.sort_order = self.sort_order.toggled();
        self.sort_order
    }

    /// 释放会话资源: 先图表,后学生序列
    ///
    /// # 返回
    /// - 释放的图表数量
    pub fn dispose(mut self) -> usize {
        let released_charts = self.charts.dispose();
        let released_students = self.students.len();
        self.students.clear();
        info!(
            session_id = %self.session_id,
            released_charts,
            released_students,
            "会话已释放"
        );
        released_charts
    }
}

// ==========================================
// SessionManager - 当前会话与上传代数
// ==========================================
#[derive(Debug, Default)]
pub struct SessionManager {
    generation: u64,
    current: Option<DashboardSession>,
}

impl SessionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// 开始一次上传,领取新代数的凭据（此前领取的凭据全部过期）
    pub fn begin_upload(&mut self) -> UploadTicket {
        self.generation += 1;
        UploadTicket {
            generation: self.generation,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_current(&self, ticket: UploadTicket) -> bool {
        ticket.generation == self.generation
    }

    /// 凭据校验（过期凭据返回 StaleUpload）
    pub fn check_ticket(&self, ticket: UploadTicket) -> SessionResult<()> {
        if self.is_current(ticket) {
            Ok(())
        } else {
            warn!(
                ticket = ticket.generation,
                latest = self.generation,
                "上传已过期,结果丢弃"
            );
            Err(SessionError::StaleUpload {
                ticket: ticket.generation,
                latest: self.generation,
            })
        }
    }

    /// 安装上传结果（create 或 replace）
    ///
    /// # 返回
    /// - Ok(&DashboardSession): 新会话
    /// - Err(StaleUpload): 凭据已过期,新会话被丢弃,当前会话保持不变
    pub fn install(
        &mut self,
        ticket: UploadTicket,
        session: DashboardSession,
    ) -> SessionResult<&DashboardSession> {
        if let Err(e) = self.check_ticket(ticket) {
            session.dispose();
            return Err(e);
        }

        if let Some(previous) = self.current.take() {
            info!(
                previous = %previous.session_id(),
                next = %session.session_id(),
                "替换当前会话"
            );
            previous.dispose();
        } else {
            info!(session_id = %session.session_id(), "创建会话");
        }

        let installed: &DashboardSession = self.current.insert(session);
        Ok(installed)
    }

    pub fn active(&self) -> Option<&DashboardSession> {
        self.current.as_ref()
    }

    pub fn active_mut(&mut self) -> Option<&mut DashboardSession> {
        self.current.as_mut()
    }

    /// 重置: 释放当前会话并使所有进行中的上传过期
    ///
    /// # 返回
    /// - 是否存在被释放的会话
    pub fn reset(&mut self) -> bool {
        self.generation += 1;
        match self.current.take() {
            Some(session) => {
                session.dispose();
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::statistics::StatisticsEngine;

    fn batch(label: &str) -> ImportedBatch {
        let student = Student {
            id: 1,
            student: "Amal Perera".to_string(),
            nic: String::new(),
            registration_no: String::new(),
            admission_no: String::new(),
            subject_marks: 60.0,
            assessment_marks: 20.0,
            final_marks: 80,
            grade: "A".to_string(),
            absent_count: 0,
            status: "Processed".to_string(),
            remark: String::new(),
        };
        ImportedBatch {
            file_name: format!("{}.xlsx", label),
            batch_label: label.to_string(),
            students: vec![student],
        }
    }

    fn session(label: &str) -> DashboardSession {
        let batch = batch(label);
        let snapshot = StatisticsEngine::new().compute(&batch.students).unwrap();
        DashboardSession::create(batch, snapshot, ChartSet::default())
    }

    #[test]
    fn test_first_install_creates_session() {
        let mut manager = SessionManager::new();
        let ticket = manager.begin_upload();

        let installed = manager.install(ticket, session("first")).unwrap();
        assert_eq!(installed.batch_label(), "first");
        assert_eq!(installed.sort_order(), SortOrder::Ascending);
        assert!(manager.active().is_some());
    }

    #[test]
    fn test_later_install_replaces_session() {
        let mut manager = SessionManager::new();
        let first = manager.begin_upload();
        let first_id = manager.install(first, session("first")).unwrap().session_id();

        let second = manager.begin_upload();
        let second_id = manager.install(second, session("second")).unwrap().session_id();

        assert_ne!(first_id, second_id);
        assert_eq!(manager.active().map(|s| s.batch_label()), Some("second"));
    }

    #[test]
    fn test_stale_ticket_is_discarded() {
        let mut manager = SessionManager::new();
        let older = manager.begin_upload();
        let newer = manager.begin_upload();

        manager.install(newer, session("newer")).unwrap();
        let err = manager.install(older, session("older")).unwrap_err();

        assert_eq!(err, SessionError::StaleUpload { ticket: 1, latest: 2 });
        assert_eq!(manager.active().map(|s| s.batch_label()), Some("newer"));
    }

    #[test]
    fn test_reset_disposes_and_expires_tickets() {
        let mut manager = SessionManager::new();
        let ticket = manager.begin_upload();
        manager.install(ticket, session("first")).unwrap();

        let in_flight = manager.begin_upload();
        assert!(manager.reset());
        assert!(manager.active().is_none());
        assert!(!manager.is_current(in_flight));
        assert!(!manager.reset());
    }

    #[test]
    fn test_toggle_sort_alternates() {
        let mut s = session("first");
        assert_eq!(s.toggle_sort(), SortOrder::Descending);
        assert_eq!(s.toggle_sort(), SortOrder::Ascending);
    }
}
