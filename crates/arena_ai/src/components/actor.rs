//! Базовые компоненты акторов: Actor, Health, Ammo

use bevy::prelude::*;
use std::fmt;

/// Stable ID команды (friend/foe фильтр)
pub type TeamId = u64;

/// Актор (агент арены): базовый компонент для живых существ
///
/// Автоматически добавляет Health и Transform через Required Components.
/// Команда неизменна после спавна.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
#[require(Health, Transform)]
pub struct Actor {
    pub team: TeamId,
}

/// Событие здоровья, которое получают подписчики
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HealthEvent {
    Damaged { amount: f32, source: Option<Entity> },
    Died { source: Option<Entity> },
}

/// Подписчик на изменения здоровья (вызывается синхронно, в порядке регистрации)
pub type HealthObserver = Box<dyn Fn(&HealthEvent) + Send + Sync>;

/// Результат `Health::take_damage`
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DamageOutcome {
    pub applied: f32,
    pub died: bool,
}

/// Здоровье актора
///
/// Инвариант: 0 ≤ current ≤ max
/// Died отправляется ровно один раз (урон по мёртвому игнорируется).
#[derive(Component)]
pub struct Health {
    pub current: f32,
    pub max: f32,
    observers: Vec<HealthObserver>,
}

impl Default for Health {
    fn default() -> Self {
        Self::new(100.0)
    }
}

impl fmt::Debug for Health {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Health")
            .field("current", &self.current)
            .field("max", &self.max)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl Health {
    pub fn new(max: f32) -> Self {
        Self {
            current: max,
            max,
            observers: Vec::new(),
        }
    }

    /// Здоровье с произвольным стартовым значением (clamped)
    pub fn with_current(max: f32, current: f32) -> Self {
        Self {
            current: current.clamp(0.0, max),
            ..Self::new(max)
        }
    }

    pub fn is_alive(&self) -> bool {
        self.current > 0.0
    }

    pub fn is_dead(&self) -> bool {
        !self.is_alive()
    }

    /// Доля здоровья в [0, 1] (0 если max не задан)
    pub fn health01(&self) -> f32 {
        if self.max <= 0.0 {
            0.0
        } else {
            self.current / self.max
        }
    }

    pub fn subscribe(&mut self, observer: impl Fn(&HealthEvent) + Send + Sync + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Урон <= 0 и урон по мёртвому: no-op, подписчики не вызываются
    pub fn take_damage(&mut self, amount: f32, source: Option<Entity>) -> DamageOutcome {
        if self.is_dead() || amount <= 0.0 {
            return DamageOutcome::default();
        }

        let applied = amount.min(self.current);
        self.current -= amount;
        self.notify(&HealthEvent::Damaged { amount, source });

        let died = self.current <= 0.0;
        if died {
            self.current = 0.0;
            self.notify(&HealthEvent::Died { source });
        }

        DamageOutcome { applied, died }
    }

    /// Лечение (мёртвых не лечим, clamp к max)
    pub fn heal(&mut self, amount: f32) {
        if self.is_dead() {
            return;
        }
        self.current = (self.current + amount).clamp(0.0, self.max);
    }

    /// Полное восстановление (respawn). Подписчики сохраняются.
    pub fn reset(&mut self) {
        self.current = self.max;
    }

    fn notify(&self, event: &HealthEvent) {
        for observer in &self.observers {
            observer(event);
        }
    }
}

/// Боезапас
///
/// Инвариант: 0 ≤ current ≤ max
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Ammo {
    pub current: u32,
    pub max: u32,
}

impl Default for Ammo {
    fn default() -> Self {
        Self::new(30)
    }
}

impl Ammo {
    pub fn new(max: u32) -> Self {
        Self { current: max, max }
    }

    pub fn has_ammo(&self) -> bool {
        self.current > 0
    }

    pub fn ammo01(&self) -> f32 {
        if self.max == 0 {
            0.0
        } else {
            self.current as f32 / self.max as f32
        }
    }

    pub fn consume(&mut self, amount: u32) -> bool {
        if self.current < amount {
            return false;
        }
        self.current -= amount;
        true
    }

    pub fn add(&mut self, amount: u32) {
        self.current = self.current.saturating_add(amount).min(self.max);
    }

    pub fn reset(&mut self) {
        self.current = self.max;
    }
}

/// Чтение ресурсов агента для AI (только read-only)
///
/// `ammo01() == None`: у агента нет боезапаса вообще (ammo факторы нейтральны).
pub trait ResourceState {
    fn health01(&self) -> f32;
    fn ammo01(&self) -> Option<f32>;
}

/// Snapshot ресурсов на момент тика
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResourceSnapshot {
    pub health01: f32,
    pub ammo01: Option<f32>,
}

impl ResourceSnapshot {
    pub fn capture(health: &Health, ammo: Option<&Ammo>) -> Self {
        Self {
            health01: health.health01(),
            ammo01: ammo.map(Ammo::ammo01),
        }
    }
}

impl ResourceState for ResourceSnapshot {
    fn health01(&self) -> f32 {
        self.health01
    }

    fn ammo01(&self) -> Option<f32> {
        self.ammo01
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_health_damage_and_death() {
        let mut health = Health::new(100.0);

        let outcome = health.take_damage(30.0, None);
        assert_eq!(health.current, 70.0);
        assert_eq!(outcome.applied, 30.0);
        assert!(!outcome.died);

        let outcome = health.take_damage(100.0, None);
        assert_eq!(health.current, 0.0);
        assert_eq!(outcome.applied, 70.0);
        assert!(outcome.died);
        assert!(health.is_dead());

        // Урон по мёртвому игнорируется
        let outcome = health.take_damage(10.0, None);
        assert_eq!(outcome, DamageOutcome::default());
    }

    #[test]
    fn test_zero_damage_is_silent() {
        let calls = Arc::new(Mutex::new(0));
        let mut health = Health::new(50.0);

        let counter = Arc::clone(&calls);
        health.subscribe(move |_| {
            *counter.lock().unwrap() += 1;
        });

        assert_eq!(health.take_damage(0.0, None), DamageOutcome::default());
        assert_eq!(health.take_damage(-5.0, None), DamageOutcome::default());
        assert_eq!(health.current, 50.0);
        assert_eq!(*calls.lock().unwrap(), 0);
    }

    #[test]
    fn test_heal_clamped_and_ignored_when_dead() {
        let mut health = Health::new(100.0);
        health.take_damage(50.0, None);
        health.heal(30.0);
        assert_eq!(health.current, 80.0);
        health.heal(100.0);
        assert_eq!(health.current, 100.0);

        health.take_damage(200.0, None);
        health.heal(40.0);
        assert_eq!(health.current, 0.0);

        health.reset();
        assert_eq!(health.current, 100.0);
    }

    #[test]
    fn test_observers_called_in_registration_order() {
        let calls: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
        let mut health = Health::new(20.0);

        let first = Arc::clone(&calls);
        health.subscribe(move |event| {
            first.lock().unwrap().push(format!("first:{:?}", event));
        });
        let second = Arc::clone(&calls);
        health.subscribe(move |event| {
            let tag = match event {
                HealthEvent::Damaged { .. } => "damaged",
                HealthEvent::Died { .. } => "died",
            };
            second.lock().unwrap().push(format!("second:{}", tag));
        });

        health.take_damage(25.0, None);
        health.take_damage(5.0, None);

        let calls = calls.lock().unwrap();
        assert_eq!(calls.len(), 4, "calls = {:?}", calls);
        assert!(calls[0].starts_with("first:Damaged"));
        assert_eq!(calls[1], "second:damaged");
        assert!(calls[2].starts_with("first:Died"));
        assert_eq!(calls[3], "second:died");
    }

    #[test]
    fn test_ammo_consume_and_add() {
        let mut ammo = Ammo::new(30);
        assert!(ammo.consume(1));
        assert_eq!(ammo.current, 29);
        assert!(!ammo.consume(30));
        assert_eq!(ammo.current, 29);

        ammo.add(10);
        assert_eq!(ammo.current, 30);
        assert_eq!(ammo.ammo01(), 1.0);

        assert_eq!(Ammo::new(0).ammo01(), 0.0);
    }

    #[test]
    fn test_resource_snapshot() {
        let health = Health::with_current(100.0, 25.0);
        let snapshot = ResourceSnapshot::capture(&health, None);
        assert_eq!(snapshot.health01(), 0.25);
        assert_eq!(snapshot.ammo01(), None);
    }
}
