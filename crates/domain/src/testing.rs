//! 服务层单元测试使用的内存仓储

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use staffing_core::{StaffingError, StaffingResult};
use std::collections::BTreeMap;
use std::sync::Mutex;

use crate::entities::*;
use crate::repositories::*;
use crate::value_objects::GeoPoint;

pub fn sample_work_order(id: i64, role: &str) -> WorkOrder {
    WorkOrder {
        id,
        org_id: 1,
        site_id: None,
        role_name: role.to_string(),
        headcount: 1,
        start: Utc.with_ymd_and_hms(2025, 3, 1, 8, 0, 0).unwrap(),
        duration_mins: 480,
        recurring_rule: None,
        budget: 1500.0,
        status: WorkOrderStatus::Open,
        created_at: Utc::now(),
    }
}

pub fn sample_worker(id: i64, skills: &[&str]) -> Worker {
    Worker {
        id,
        user_id: None,
        name: format!("worker-{id}"),
        skills: skills.iter().map(|s| s.to_string()).collect(),
        languages: vec!["Hindi".to_string()],
        base_rate: 150.0,
        rate_unit: RateUnit::Hour,
        radius_km: 5.0,
        rating: 4.0,
        strikes: 0,
        created_at: Utc::now(),
    }
}

#[derive(Default)]
struct State {
    work_orders: BTreeMap<i64, WorkOrder>,
    sites: BTreeMap<i64, Site>,
    workers: BTreeMap<i64, Worker>,
    offers: BTreeMap<i64, Offer>,
    assignments: BTreeMap<i64, Assignment>,
    shifts: BTreeMap<i64, Shift>,
    attendance: BTreeMap<i64, Attendance>,
    batches: Vec<OfferBatch>,
    next_id: i64,
}

impl State {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        1000 + self.next_id
    }
}

/// 所有仓储 trait 的单进程实现，语义与 SQLite 实现保持一致
#[derive(Default)]
pub struct InMemoryStore {
    state: Mutex<State>,
}

impl InMemoryStore {
    pub fn put_work_order(&self, work_order: WorkOrder) {
        let mut state = self.state.lock().unwrap();
        state.work_orders.insert(work_order.id, work_order);
    }

    pub fn put_worker(&self, worker: Worker) {
        let mut state = self.state.lock().unwrap();
        state.workers.insert(worker.id, worker);
    }

    pub fn put_offer(&self, id: i64, work_order_id: i64, worker_id: i64, status: OfferStatus) {
        let expires_at = Utc::now() + chrono::Duration::hours(1);
        self.put_offer_expiring(id, work_order_id, worker_id, status, expires_at);
    }

    pub fn put_offer_expiring(
        &self,
        id: i64,
        work_order_id: i64,
        worker_id: i64,
        status: OfferStatus,
        expires_at: DateTime<Utc>,
    ) {
        let mut state = self.state.lock().unwrap();
        state.offers.insert(
            id,
            Offer {
                id,
                work_order_id,
                worker_id,
                status,
                expires_at,
                created_at: Utc::now(),
            },
        );
    }

    pub fn offer(&self, id: i64) -> Option<Offer> {
        self.state.lock().unwrap().offers.get(&id).cloned()
    }

    pub fn offer_count(&self) -> usize {
        self.state.lock().unwrap().offers.len()
    }

    pub fn assignment_count(&self) -> usize {
        self.state.lock().unwrap().assignments.len()
    }

    pub fn shift_count(&self) -> usize {
        self.state.lock().unwrap().shifts.len()
    }

    pub fn batches(&self) -> Vec<OfferBatch> {
        self.state.lock().unwrap().batches.clone()
    }
}

#[async_trait]
impl WorkOrderRepository for InMemoryStore {
    async fn create(&self, work_order: &NewWorkOrder) -> StaffingResult<WorkOrder> {
        let mut state = self.state.lock().unwrap();
        let id = state.next_id();
        let created = WorkOrder {
            id,
            org_id: work_order.org_id,
            site_id: work_order.site_id,
            role_name: work_order.role_name.clone(),
            headcount: work_order.headcount,
            start: work_order.start,
            duration_mins: work_order.duration_mins,
            recurring_rule: work_order.recurring_rule.clone(),
            budget: work_order.budget,
            status: work_order.status,
            created_at: Utc::now(),
        };
        state.work_orders.insert(id, created.clone());
        Ok(created)
    }

    async fn get(&self, id: i64) -> StaffingResult<Option<WorkOrder>> {
        Ok(self.state.lock().unwrap().work_orders.get(&id).cloned())
    }

    async fn list(&self) -> StaffingResult<Vec<WorkOrder>> {
        Ok(self.state.lock().unwrap().work_orders.values().cloned().collect())
    }

    async fn list_by_status(&self, status: WorkOrderStatus) -> StaffingResult<Vec<WorkOrder>> {
        let state = self.state.lock().unwrap();
        let mut work_orders: Vec<WorkOrder> = state
            .work_orders
            .values()
            .filter(|w| w.status == status)
            .cloned()
            .collect();
        work_orders.sort_by_key(|w| (w.start, w.id));
        Ok(work_orders)
    }

    async fn update_status(
        &self,
        id: i64,
        status: WorkOrderStatus,
    ) -> StaffingResult<WorkOrder> {
        let mut state = self.state.lock().unwrap();
        let work_order = state
            .work_orders
            .get_mut(&id)
            .ok_or(StaffingError::WorkOrderNotFound { id })?;
        work_order.status = status;
        Ok(work_order.clone())
    }

    async fn create_site(&self, site: &NewSite) -> StaffingResult<Site> {
        let mut state = self.state.lock().unwrap();
        let id = state.next_id();
        let created = Site {
            id,
            org_id: site.org_id,
            name: site.name.clone(),
            address: site.address.clone(),
            lat: site.lat,
            lng: site.lng,
            created_at: Utc::now(),
        };
        state.sites.insert(id, created.clone());
        Ok(created)
    }

    async fn get_site(&self, id: i64) -> StaffingResult<Option<Site>> {
        Ok(self.state.lock().unwrap().sites.get(&id).cloned())
    }
}

#[async_trait]
impl WorkerDirectory for InMemoryStore {
    async fn create(&self, worker: &NewWorker) -> StaffingResult<Worker> {
        let mut state = self.state.lock().unwrap();
        if let Some(user_id) = worker.user_id {
            if state.workers.values().any(|w| w.user_id == Some(user_id)) {
                return Err(StaffingError::WorkerAlreadyLinked { user_id });
            }
        }
        let id = state.next_id();
        let created = Worker {
            id,
            user_id: worker.user_id,
            name: worker.name.clone(),
            skills: worker.skills.clone(),
            languages: worker.languages.clone(),
            base_rate: worker.base_rate,
            rate_unit: worker.rate_unit,
            radius_km: worker.radius_km,
            rating: worker.rating,
            strikes: worker.strikes,
            created_at: Utc::now(),
        };
        state.workers.insert(id, created.clone());
        Ok(created)
    }

    async fn get(&self, id: i64) -> StaffingResult<Option<Worker>> {
        Ok(self.state.lock().unwrap().workers.get(&id).cloned())
    }

    async fn list(&self) -> StaffingResult<Vec<Worker>> {
        Ok(self.state.lock().unwrap().workers.values().cloned().collect())
    }

    async fn list_by_role(&self, role: &str) -> StaffingResult<Vec<Worker>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .workers
            .values()
            .filter(|w| w.has_skill(role))
            .cloned()
            .collect())
    }

    async fn existing_ids(&self, ids: &[i64]) -> StaffingResult<Vec<i64>> {
        let state = self.state.lock().unwrap();
        Ok(ids
            .iter()
            .copied()
            .filter(|id| state.workers.contains_key(id))
            .collect())
    }

    async fn find_by_user(&self, user_id: i64) -> StaffingResult<Option<Worker>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .workers
            .values()
            .find(|w| w.user_id == Some(user_id))
            .cloned())
    }
}

#[async_trait]
impl OfferRepository for InMemoryStore {
    async fn list(&self) -> StaffingResult<Vec<Offer>> {
        Ok(self.state.lock().unwrap().offers.values().rev().cloned().collect())
    }

    async fn get(&self, id: i64) -> StaffingResult<Option<Offer>> {
        Ok(self.offer(id))
    }

    async fn send_batch(&self, batch: &OfferBatch) -> StaffingResult<SendOutcome> {
        let mut state = self.state.lock().unwrap();
        state.batches.push(batch.clone());

        let mut outcome = SendOutcome::default();
        for worker_id in &batch.worker_ids {
            let blocked = state.offers.values().any(|o| {
                o.work_order_id == batch.work_order_id
                    && o.worker_id == *worker_id
                    && !(batch.resend_after_terminal && o.status.is_terminal())
            });
            if blocked {
                outcome.skipped += 1;
                continue;
            }
            let id = state.next_id();
            state.offers.insert(
                id,
                Offer {
                    id,
                    work_order_id: batch.work_order_id,
                    worker_id: *worker_id,
                    status: OfferStatus::Sent,
                    expires_at: batch.expires_at,
                    created_at: Utc::now(),
                },
            );
            outcome.created += 1;
        }
        Ok(outcome)
    }

    async fn accept(
        &self,
        id: i64,
        now: DateTime<Utc>,
        enforce_expiry: bool,
    ) -> StaffingResult<AcceptedOffer> {
        let mut state = self.state.lock().unwrap();
        let offer = state
            .offers
            .get(&id)
            .cloned()
            .ok_or(StaffingError::OfferNotFound { id })?;
        if offer.status != OfferStatus::Sent {
            return Err(StaffingError::OfferNotSent {
                id,
                status: offer.status.to_string(),
            });
        }
        if enforce_expiry && offer.is_expired_at(now) {
            return Err(StaffingError::OfferExpired { id });
        }
        let work_order = state
            .work_orders
            .get(&offer.work_order_id)
            .cloned()
            .ok_or(StaffingError::WorkOrderNotFound {
                id: offer.work_order_id,
            })?;
        let worker = state
            .workers
            .get(&offer.worker_id)
            .cloned()
            .ok_or(StaffingError::WorkerNotFound {
                id: offer.worker_id,
            })?;

        let existing = state
            .assignments
            .values()
            .find(|a| a.work_order_id == offer.work_order_id && a.worker_id == offer.worker_id)
            .cloned();
        let assignment = match existing {
            Some(existing) => existing,
            None => {
                let assignment_id = state.next_id();
                let created = Assignment {
                    id: assignment_id,
                    work_order_id: offer.work_order_id,
                    worker_id: offer.worker_id,
                    is_final: true,
                    created_at: now,
                };
                state.assignments.insert(assignment_id, created.clone());
                created
            }
        };

        let existing = state
            .shifts
            .values()
            .find(|s| s.assignment_id == assignment.id && s.auto_created)
            .cloned();
        let shift = match existing {
            Some(existing) => existing,
            None => {
                let shift_id = state.next_id();
                let window = work_order.shift_window();
                let created = Shift {
                    id: shift_id,
                    assignment_id: assignment.id,
                    start_planned: window.start,
                    end_planned: window.end,
                    start_actual: None,
                    end_actual: None,
                    status: ShiftStatus::Planned,
                    auto_created: true,
                    created_at: now,
                };
                state.shifts.insert(shift_id, created.clone());
                created
            }
        };

        let offer = state
            .offers
            .get_mut(&id)
            .map(|o| {
                o.status = OfferStatus::Accepted;
                o.clone()
            })
            .ok_or(StaffingError::OfferNotFound { id })?;

        Ok(AcceptedOffer {
            offer,
            work_order,
            worker,
            assignment,
            shift,
        })
    }

    async fn reject(&self, id: i64, strict: bool) -> StaffingResult<Offer> {
        let mut state = self.state.lock().unwrap();
        let offer = state
            .offers
            .get_mut(&id)
            .ok_or(StaffingError::OfferNotFound { id })?;
        if strict && !matches!(offer.status, OfferStatus::Sent | OfferStatus::Rejected) {
            return Err(StaffingError::OfferNotSent {
                id,
                status: offer.status.to_string(),
            });
        }
        offer.status = OfferStatus::Rejected;
        Ok(offer.clone())
    }

    async fn delete(&self, id: i64) -> StaffingResult<Offer> {
        self.state
            .lock()
            .unwrap()
            .offers
            .remove(&id)
            .ok_or(StaffingError::OfferNotFound { id })
    }

    async fn list_for_worker(&self, worker_id: i64) -> StaffingResult<Vec<WorkerOffer>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .offers
            .values()
            .rev()
            .filter(|o| o.worker_id == worker_id)
            .filter_map(|o| {
                let work_order = state.work_orders.get(&o.work_order_id)?.clone();
                let site = work_order
                    .site_id
                    .and_then(|site_id| state.sites.get(&site_id).cloned());
                Some(WorkerOffer {
                    offer: o.clone(),
                    work_order: WorkOrderWithSite { work_order, site },
                })
            })
            .collect())
    }
}

#[async_trait]
impl AssignmentRepository for InMemoryStore {
    async fn list(&self) -> StaffingResult<Vec<Assignment>> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .assignments
            .values()
            .rev()
            .cloned()
            .collect())
    }

    async fn find_by_pair(
        &self,
        work_order_id: i64,
        worker_id: i64,
    ) -> StaffingResult<Option<Assignment>> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .assignments
            .values()
            .find(|a| a.work_order_id == work_order_id && a.worker_id == worker_id)
            .cloned())
    }
}

#[async_trait]
impl ShiftRepository for InMemoryStore {
    async fn list(&self) -> StaffingResult<Vec<Shift>> {
        Ok(self.state.lock().unwrap().shifts.values().rev().cloned().collect())
    }

    async fn get(&self, id: i64) -> StaffingResult<Option<Shift>> {
        Ok(self.state.lock().unwrap().shifts.get(&id).cloned())
    }

    async fn list_for_assignment(&self, assignment_id: i64) -> StaffingResult<Vec<Shift>> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .shifts
            .values()
            .filter(|s| s.assignment_id == assignment_id)
            .cloned()
            .collect())
    }

    async fn check_in(
        &self,
        id: i64,
        now: DateTime<Utc>,
        point: Option<GeoPoint>,
    ) -> StaffingResult<ShiftCheckpoint> {
        let mut state = self.state.lock().unwrap();
        let shift = state
            .shifts
            .get_mut(&id)
            .ok_or(StaffingError::ShiftNotFound { id })?;
        let transitioned =
            !(shift.status == ShiftStatus::InProgress || shift.start_actual.is_some());
        if transitioned {
            shift.status = ShiftStatus::InProgress;
            shift.start_actual = Some(now);
        }
        let shift = shift.clone();

        if transitioned || point.is_some() {
            let attendance = state.attendance.entry(id).or_insert_with(|| Attendance {
                id,
                shift_id: id,
                in_lat: None,
                in_lng: None,
                out_lat: None,
                out_lng: None,
                created_at: now,
            });
            if let Some(point) = point {
                if attendance.in_lat.is_none() || attendance.in_lng.is_none() {
                    attendance.in_lat = Some(point.lat);
                    attendance.in_lng = Some(point.lng);
                }
            }
        }

        Ok(ShiftCheckpoint {
            attendance: state.attendance.get(&id).cloned(),
            shift,
            transitioned,
        })
    }

    async fn check_out(
        &self,
        id: i64,
        now: DateTime<Utc>,
        point: Option<GeoPoint>,
    ) -> StaffingResult<ShiftCheckpoint> {
        let mut state = self.state.lock().unwrap();
        let shift = state
            .shifts
            .get_mut(&id)
            .ok_or(StaffingError::ShiftNotFound { id })?;
        let transitioned =
            !(shift.status == ShiftStatus::Completed && shift.end_actual.is_some());
        if transitioned {
            shift.status = ShiftStatus::Completed;
            shift.end_actual = Some(now);
        }
        let shift = shift.clone();

        if transitioned || point.is_some() {
            let attendance = state.attendance.entry(id).or_insert_with(|| Attendance {
                id,
                shift_id: id,
                in_lat: None,
                in_lng: None,
                out_lat: None,
                out_lng: None,
                created_at: now,
            });
            if let Some(point) = point {
                attendance.out_lat = Some(point.lat);
                attendance.out_lng = Some(point.lng);
            }
        }

        Ok(ShiftCheckpoint {
            attendance: state.attendance.get(&id).cloned(),
            shift,
            transitioned,
        })
    }

    async fn list_for_worker(&self, worker_id: i64) -> StaffingResult<Vec<WorkerShift>> {
        let state = self.state.lock().unwrap();
        let mut shifts: Vec<WorkerShift> = state
            .shifts
            .values()
            .filter_map(|shift| {
                let assignment = state.assignments.get(&shift.assignment_id)?;
                if assignment.worker_id != worker_id {
                    return None;
                }
                let site = state
                    .work_orders
                    .get(&assignment.work_order_id)
                    .and_then(|wo| wo.site_id)
                    .and_then(|site_id| state.sites.get(&site_id).cloned());
                Some(WorkerShift {
                    shift: shift.clone(),
                    site,
                    attendance: state.attendance.get(&shift.id).cloned(),
                })
            })
            .collect();
        shifts.sort_by_key(|s| s.shift.start_planned);
        Ok(shifts)
    }
}
