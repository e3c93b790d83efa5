use crate::value_objects::{Floor, TravelDirection};

/// 待处理的楼层呼叫集合
///
/// 楼层号不重复，按插入顺序枚举。电梯楼层数很小，线性扫描足够。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingCalls {
    floors: Vec<Floor>,
}

impl PendingCalls {
    pub fn new() -> Self {
        Self::default()
    }

    /// 插入呼叫，已存在时不做任何修改；返回是否新插入
    pub fn insert(&mut self, floor: Floor) -> bool {
        if self.floors.contains(&floor) {
            return false;
        }
        self.floors.push(floor);
        true
    }

    /// 移除呼叫；返回该楼层此前是否在集合中
    pub fn remove(&mut self, floor: Floor) -> bool {
        match self.floors.iter().position(|f| *f == floor) {
            Some(index) => {
                self.floors.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, floor: Floor) -> bool {
        self.floors.contains(&floor)
    }

    pub fn floors(&self) -> &[Floor] {
        &self.floors
    }

    pub fn len(&self) -> usize {
        self.floors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.floors.is_empty()
    }

    /// 根据当前楼层和运行方向选择下一个停靠楼层
    ///
    /// - 静止：距离最近的呼叫，距离相同时取插入顺序中的第一个
    /// - 上行：高于当前楼层的最低呼叫，没有则掉头取低于当前楼层的最高呼叫
    /// - 下行：低于当前楼层的最高呼叫，没有则掉头取高于当前楼层的最低呼叫
    ///
    /// 上行或下行时，恰好位于当前楼层的呼叫不会被选中。
    pub fn next_stop(&self, current: Floor, direction: TravelDirection) -> Option<Floor> {
        if self.floors.is_empty() {
            return None;
        }

        match direction {
            TravelDirection::Stationary => self.nearest(current),
            TravelDirection::Up => self
                .nearest_in(current, TravelDirection::Up)
                .or_else(|| self.nearest_in(current, TravelDirection::Down)),
            TravelDirection::Down => self
                .nearest_in(current, TravelDirection::Down)
                .or_else(|| self.nearest_in(current, TravelDirection::Up)),
        }
    }

    fn nearest(&self, current: Floor) -> Option<Floor> {
        // min_by_key 在多个最小值中返回第一个
        self.floors
            .iter()
            .copied()
            .min_by_key(|floor| floor.distance_to(current))
    }

    fn nearest_in(&self, current: Floor, direction: TravelDirection) -> Option<Floor> {
        let ahead = self.floors.iter().copied();
        match direction {
            TravelDirection::Up => ahead.filter(|floor| *floor > current).min(),
            TravelDirection::Down => ahead.filter(|floor| *floor < current).max(),
            TravelDirection::Stationary => None,
        }
    }
}

impl FromIterator<Floor> for PendingCalls {
    fn from_iter<I: IntoIterator<Item = Floor>>(iter: I) -> Self {
        let mut calls = PendingCalls::new();
        for floor in iter {
            calls.insert(floor);
        }
        calls
    }
}
