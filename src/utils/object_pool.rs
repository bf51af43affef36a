//! 对象池模块
//!
//! 一次查询编译期间创建的所有对象都由对象池持有，
//! 池销毁时统一释放。对象之间只通过池内下标互相引用，不持有彼此的所有权。
//!
//! 池是只追加的：对象一旦加入，在池的生命周期内下标始终有效，
//! 被改写淘汰的对象仍然留在池中，只是不再被引用。

use std::fmt::Debug;

/// 只追加的对象池
#[derive(Debug, Clone)]
pub struct ObjectPool<T> {
    objects: Vec<T>,
}

impl<T> ObjectPool<T> {
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            objects: Vec::with_capacity(capacity),
        }
    }

    /// 将对象放入池中，返回其下标
    pub fn make_and_add(&mut self, obj: T) -> usize {
        self.objects.push(obj);
        self.objects.len() - 1
    }

    /// 下一个对象将获得的下标
    pub fn next_index(&self) -> usize {
        self.objects.len()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.objects.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.objects.get_mut(index)
    }

    pub fn size(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &T)> {
        self.objects.iter().enumerate()
    }
}

impl<T> Default for ObjectPool<T> {
    fn default() -> Self {
        Self::new()
    }
}
