use std::sync::Arc;

use async_trait::async_trait;
use elevator_errors::ElevatorResult;
use tokio::sync::Mutex;

use crate::pending_calls::PendingCalls;
use crate::value_objects::{Floor, TravelDirection};

/// 楼层呼叫服务接口
///
/// 所有楼层参数以原始整数传入，由实现负责校验；非正整数在修改状态前即返回
/// `ElevatorError::InvalidFloor`。
#[async_trait]
pub trait FloorRequestService: Send + Sync {
    /// 添加楼层呼叫，已存在时为幂等操作
    async fn add_floor_request(&self, floor: i64) -> ElevatorResult<()>;

    /// 获取待处理的楼层呼叫（按插入顺序）
    async fn outstanding_requests(&self) -> Vec<Floor>;

    /// 移除已服务的楼层呼叫；楼层不在待处理列表中时返回 `false`
    async fn remove_floor_request(&self, floor: i64) -> ElevatorResult<bool>;

    /// 根据当前楼层和运行方向计算下一个停靠楼层，不修改待处理列表
    async fn next_floor_to_stop(
        &self,
        current_floor: i64,
        direction: TravelDirection,
    ) -> ElevatorResult<Option<Floor>>;
}

/// 进程内唯一的调度存储
///
/// 克隆得到的句柄共享同一个呼叫集合，所有操作由同一把互斥锁串行化。
#[derive(Debug, Clone, Default)]
pub struct DispatchStore {
    calls: Arc<Mutex<PendingCalls>>,
}

impl DispatchStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_floors(floors: &[i64]) -> ElevatorResult<Self> {
        let calls = floors
            .iter()
            .map(|floor| Floor::new(*floor))
            .collect::<ElevatorResult<PendingCalls>>()?;

        Ok(Self {
            calls: Arc::new(Mutex::new(calls)),
        })
    }

    pub async fn len(&self) -> usize {
        self.calls.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.calls.lock().await.is_empty()
    }
}

#[async_trait]
impl FloorRequestService for DispatchStore {
    async fn add_floor_request(&self, floor: i64) -> ElevatorResult<()> {
        let floor = Floor::new(floor)?;
        self.calls.lock().await.insert(floor);
        Ok(())
    }

    async fn outstanding_requests(&self) -> Vec<Floor> {
        self.calls.lock().await.floors().to_vec()
    }

    async fn remove_floor_request(&self, floor: i64) -> ElevatorResult<bool> {
        let floor = Floor::new(floor)?;
        Ok(self.calls.lock().await.remove(floor))
    }

    async fn next_floor_to_stop(
        &self,
        current_floor: i64,
        direction: TravelDirection,
    ) -> ElevatorResult<Option<Floor>> {
        let current_floor = Floor::new(current_floor)?;
        Ok(self.calls.lock().await.next_stop(current_floor, direction))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use elevator_errors::ElevatorError;

    fn floors(values: &[i64]) -> Vec<Floor> {
        values.iter().map(|v| Floor::new(*v).unwrap()).collect()
    }

    #[tokio::test]
    async fn test_add_is_idempotent() {
        let store = DispatchStore::new();
        store.add_floor_request(5).await.unwrap();
        store.add_floor_request(5).await.unwrap();
        store.add_floor_request(5).await.unwrap();

        assert_eq!(store.outstanding_requests().await, floors(&[5]));
    }

    #[tokio::test]
    async fn test_invalid_floor_leaves_set_unchanged() {
        let store = DispatchStore::with_floors(&[2, 4]).unwrap();

        for invalid in [0, -1, i64::MIN] {
            assert!(matches!(
                store.add_floor_request(invalid).await,
                Err(ElevatorError::InvalidFloor { .. })
            ));
            assert!(matches!(
                store.remove_floor_request(invalid).await,
                Err(ElevatorError::InvalidFloor { .. })
            ));
            for direction in [
                TravelDirection::Stationary,
                TravelDirection::Up,
                TravelDirection::Down,
            ] {
                assert!(matches!(
                    store.next_floor_to_stop(invalid, direction).await,
                    Err(ElevatorError::InvalidFloor { .. })
                ));
            }
        }

        assert_eq!(store.outstanding_requests().await, floors(&[2, 4]));
    }

    #[tokio::test]
    async fn test_remove_returns_true_only_when_present() {
        let store = DispatchStore::with_floors(&[3, 8]).unwrap();

        assert!(store.remove_floor_request(3).await.unwrap());
        assert!(!store.remove_floor_request(3).await.unwrap());
        assert!(!store.remove_floor_request(11).await.unwrap());
        assert_eq!(store.outstanding_requests().await, floors(&[8]));
    }

    #[tokio::test]
    async fn test_empty_store() {
        let store = DispatchStore::new();
        assert!(store.is_empty().await);
        assert!(store.outstanding_requests().await.is_empty());
        assert_eq!(
            store
                .next_floor_to_stop(7, TravelDirection::Down)
                .await
                .unwrap(),
            None
        );
    }

    #[tokio::test]
    async fn test_next_stop_scenarios() {
        let store = DispatchStore::with_floors(&[5, 10]).unwrap();
        assert_eq!(
            store
                .next_floor_to_stop(7, TravelDirection::Stationary)
                .await
                .unwrap(),
            Some(Floor::new(5).unwrap())
        );

        let store = DispatchStore::with_floors(&[3, 9, 15]).unwrap();
        assert_eq!(
            store.next_floor_to_stop(7, TravelDirection::Up).await.unwrap(),
            Some(Floor::new(9).unwrap())
        );

        let store = DispatchStore::with_floors(&[3]).unwrap();
        assert_eq!(
            store.next_floor_to_stop(7, TravelDirection::Up).await.unwrap(),
            Some(Floor::new(3).unwrap())
        );
        // 查询下一站不会移除呼叫
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let store = DispatchStore::new();
        let handle = store.clone();

        handle.add_floor_request(6).await.unwrap();
        assert_eq!(store.outstanding_requests().await, floors(&[6]));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_add_and_remove_stay_consistent() {
        for _ in 0..50 {
            let store = DispatchStore::new();
            let adder = store.clone();
            let remover = store.clone();

            let (added, removed) = tokio::join!(
                tokio::spawn(async move { adder.add_floor_request(5).await }),
                tokio::spawn(async move { remover.remove_floor_request(5).await }),
            );
            added.unwrap().unwrap();
            let removed = removed.unwrap().unwrap();

            let calls = store.outstanding_requests().await;
            if removed {
                assert!(calls.is_empty());
            } else {
                assert_eq!(calls, floors(&[5]));
            }
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_adds_never_duplicate() {
        let store = DispatchStore::new();
        let tasks: Vec<_> = (0..64)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move { store.add_floor_request(i % 8 + 1).await })
            })
            .collect();

        for result in futures::future::join_all(tasks).await {
            result.unwrap().unwrap();
        }

        let mut calls: Vec<i64> = store
            .outstanding_requests()
            .await
            .into_iter()
            .map(i64::from)
            .collect();
        calls.sort_unstable();
        assert_eq!(calls, (1..=8).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_with_floors_rejects_invalid() {
        assert!(matches!(
            DispatchStore::with_floors(&[1, 0]),
            Err(ElevatorError::InvalidFloor { floor: 0 })
        ));
    }

    #[tokio::test]
    async fn test_usable_as_trait_object() {
        let service: Arc<dyn FloorRequestService> = Arc::new(DispatchStore::new());
        service.add_floor_request(2).await.unwrap();
        assert_eq!(service.outstanding_requests().await, floors(&[2]));
    }
}
