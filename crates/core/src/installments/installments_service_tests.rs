use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use rust_decimal_macros::dec;
use uuid::Uuid;

use super::installments_errors::InstallmentError;
use super::installments_model::{
    Installment, InstallmentGroup, InstallmentStatus, NewInstallmentGroup,
};
use super::installments_service::InstallmentService;
use super::installments_traits::{InstallmentRepositoryTrait, InstallmentServiceTrait};
use crate::accounts::{Account, AccountRepositoryTrait, AccountType};
use crate::categories::{Category, CategoryResolverTrait};
use crate::db::{ImmediateExecutor, TransactionExecutor};
use crate::errors::{DatabaseError, Error, Result};
use crate::time::Clock;
use crate::transactions::{
    NewTransaction, Transaction, TransactionServiceTrait, TransactionStatus, TransactionType,
};

// ============== Mocks ==============

struct FixedClock(DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

fn fixed_clock() -> Arc<dyn Clock> {
    Arc::new(FixedClock(Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap()))
}

#[derive(Default)]
struct MockInstallmentRepository {
    groups: RwLock<HashMap<String, InstallmentGroup>>,
}

#[async_trait]
impl InstallmentRepositoryTrait for MockInstallmentRepository {
    async fn create_group(&self, group: InstallmentGroup) -> Result<InstallmentGroup> {
        self.groups
            .write()
            .unwrap()
            .insert(group.id.clone(), group.clone());
        Ok(group)
    }

    async fn save_group(&self, group: &InstallmentGroup) -> Result<()> {
        self.groups
            .write()
            .unwrap()
            .insert(group.id.clone(), group.clone());
        Ok(())
    }

    async fn delete_group(&self, group_id: &str, user_id: &str) -> Result<usize> {
        let mut groups = self.groups.write().unwrap();
        match groups.get(group_id) {
            Some(group) if group.user_id == user_id => {
                groups.remove(group_id);
                Ok(1)
            }
            _ => Err(Error::NotFound("Installment group".to_string())),
        }
    }

    fn get_group(&self, group_id: &str, user_id: &str) -> Result<InstallmentGroup> {
        self.groups
            .read()
            .unwrap()
            .get(group_id)
            .filter(|g| g.user_id == user_id)
            .cloned()
            .ok_or_else(|| Error::NotFound("Installment group".to_string()))
    }

    fn list_groups(&self, user_id: &str) -> Result<Vec<InstallmentGroup>> {
        Ok(self
            .groups
            .read()
            .unwrap()
            .values()
            .filter(|g| g.user_id == user_id)
            .cloned()
            .collect())
    }

    fn get_installment(&self, installment_id: &str, user_id: &str) -> Result<Installment> {
        self.groups
            .read()
            .unwrap()
            .values()
            .filter(|g| g.user_id == user_id)
            .flat_map(|g| g.installments.iter())
            .find(|i| i.id == installment_id)
            .cloned()
            .ok_or_else(|| Error::NotFound("Installment".to_string()))
    }

    fn save_installment(&self, installment: &Installment) -> Result<()> {
        let mut groups = self.groups.write().unwrap();
        let group = groups
            .get_mut(&installment.group_id)
            .ok_or_else(|| Error::NotFound("Installment group".to_string()))?;
        for stored in &mut group.installments {
            if stored.id == installment.id {
                *stored = installment.clone();
            }
        }
        Ok(())
    }
}

#[derive(Default)]
struct MockAccountRepository {
    accounts: RwLock<HashMap<String, Account>>,
}

impl MockAccountRepository {
    fn seed(&self, id: &str, user_id: &str) {
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        self.accounts.write().unwrap().insert(
            id.to_string(),
            Account {
                id: id.to_string(),
                user_id: user_id.to_string(),
                name: id.to_string(),
                account_type: AccountType::Checking,
                currency: "USD".to_string(),
                balance: dec!(0),
                created_at: now,
                updated_at: now,
            },
        );
    }
}

#[async_trait]
impl AccountRepositoryTrait for MockAccountRepository {
    async fn create(&self, _: Account) -> Result<Account> {
        unimplemented!()
    }

    async fn update(&self, _: Account) -> Result<Account> {
        unimplemented!()
    }

    async fn delete(&self, _: &str, _: &str) -> Result<usize> {
        unimplemented!()
    }

    fn get_by_id(&self, account_id: &str, user_id: &str) -> Result<Account> {
        self.accounts
            .read()
            .unwrap()
            .get(account_id)
            .filter(|a| a.user_id == user_id)
            .cloned()
            .ok_or_else(|| Error::NotFound("Account".to_string()))
    }

    fn list(&self, _: &str) -> Result<Vec<Account>> {
        unimplemented!()
    }

    fn save_balance(&self, _: &Account) -> Result<()> {
        unimplemented!()
    }
}

struct MockCategoryResolver;

impl CategoryResolverTrait for MockCategoryResolver {
    fn get_by_id(&self, category_id: &str, user_id: &str) -> Result<Category> {
        if category_id == "missing" {
            return Err(Error::NotFound("Category".to_string()));
        }
        Ok(Category {
            id: category_id.to_string(),
            user_id: user_id.to_string(),
            name: "Electronics".to_string(),
            color: None,
            icon: None,
        })
    }
}

/// Captures the payment requests the scheduler hands to the transaction
/// engine instead of moving real balances.
#[derive(Default)]
struct MockTransactionService {
    requests: RwLock<Vec<NewTransaction>>,
}

#[async_trait]
impl TransactionServiceTrait for MockTransactionService {
    async fn create_transaction(
        &self,
        request: NewTransaction,
        user_id: &str,
    ) -> Result<Transaction> {
        self.create_transaction_in_tx(request, user_id)
    }

    fn create_transaction_in_tx(
        &self,
        request: NewTransaction,
        user_id: &str,
    ) -> Result<Transaction> {
        let now = Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap();
        let transaction = Transaction {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            account_id: request.account_id.clone(),
            category_id: request.category_id.clone(),
            destination_account_id: request.destination_account_id.clone(),
            description: request.description.clone(),
            amount: request.amount,
            transaction_type: request.transaction_type,
            status: request.status,
            transaction_date: request.transaction_date,
            notes: request.notes.clone(),
            created_at: now,
            updated_at: now,
        };
        self.requests.write().unwrap().push(request);
        Ok(transaction)
    }

    async fn update_transaction(&self, _: &str, _: NewTransaction, _: &str) -> Result<Transaction> {
        unimplemented!()
    }

    async fn delete_transaction(&self, _: &str, _: &str) -> Result<()> {
        unimplemented!()
    }

    fn get_transaction(&self, _: &str, _: &str) -> Result<Transaction> {
        unimplemented!()
    }

    fn list_transactions(&self, _: &str) -> Result<Vec<Transaction>> {
        unimplemented!()
    }
}

struct Fixture {
    service: InstallmentService<ImmediateExecutor>,
    accounts: Arc<MockAccountRepository>,
    transactions: Arc<MockTransactionService>,
}

fn make_fixture() -> Fixture {
    let accounts = Arc::new(MockAccountRepository::default());
    let transactions = Arc::new(MockTransactionService::default());
    let service = InstallmentService::new(
        Arc::new(MockInstallmentRepository::default()),
        accounts.clone(),
        Arc::new(MockCategoryResolver),
        transactions.clone(),
        fixed_clock(),
        ImmediateExecutor,
    );
    Fixture {
        service,
        accounts,
        transactions,
    }
}

fn new_group(count: u32) -> NewInstallmentGroup {
    NewInstallmentGroup {
        account_id: "acc1".to_string(),
        category_id: Some("cat1".to_string()),
        description: "Laptop".to_string(),
        total_amount: dec!(100.00),
        installment_count: count,
        start_date: NaiveDate::from_ymd_opt(2025, 7, 10).unwrap(),
        notes: None,
    }
}

// ============== Tests ==============

#[tokio::test]
async fn test_create_group_generates_exact_sum_schedule() {
    let fixture = make_fixture();
    fixture.accounts.seed("acc1", "user1");

    let group = fixture
        .service
        .create_group(new_group(3), "user1")
        .await
        .unwrap();

    assert_eq!(group.installments.len(), 3);
    let amounts: Vec<_> = group.installments.iter().map(|i| i.amount).collect();
    assert_eq!(amounts, vec![dec!(33.34), dec!(33.33), dec!(33.33)]);

    let dates: Vec<_> = group.installments.iter().map(|i| i.due_date).collect();
    assert_eq!(
        dates,
        vec![
            NaiveDate::from_ymd_opt(2025, 7, 10).unwrap(),
            NaiveDate::from_ymd_opt(2025, 8, 10).unwrap(),
            NaiveDate::from_ymd_opt(2025, 9, 10).unwrap(),
        ]
    );

    for (index, installment) in group.installments.iter().enumerate() {
        assert_eq!(installment.installment_number, index as u32 + 1);
        assert_eq!(installment.status, InstallmentStatus::Pending);
        assert!(installment.transaction_id.is_none());
    }
    // Nothing reaches the transaction engine at creation time.
    assert!(fixture.transactions.requests.read().unwrap().is_empty());
}

#[tokio::test]
async fn test_create_group_rejects_single_installment() {
    let fixture = make_fixture();
    fixture.accounts.seed("acc1", "user1");

    let result = fixture.service.create_group(new_group(1), "user1").await;

    assert!(matches!(
        result,
        Err(Error::Installment(InstallmentError::InvalidCount {
            min: 2,
            got: 1
        }))
    ));
}

#[tokio::test]
async fn test_create_group_rejects_non_positive_total() {
    let fixture = make_fixture();
    fixture.accounts.seed("acc1", "user1");

    let mut request = new_group(3);
    request.total_amount = dec!(0);

    assert!(matches!(
        fixture.service.create_group(request, "user1").await,
        Err(Error::Validation(_))
    ));
}

#[tokio::test]
async fn test_create_group_rejects_unknown_account_or_category() {
    let fixture = make_fixture();
    fixture.accounts.seed("acc1", "user1");

    let mut foreign_account = new_group(3);
    foreign_account.account_id = "acc2".to_string();
    assert!(fixture
        .service
        .create_group(foreign_account, "user1")
        .await
        .unwrap_err()
        .is_not_found());

    let mut bad_category = new_group(3);
    bad_category.category_id = Some("missing".to_string());
    assert!(fixture
        .service
        .create_group(bad_category, "user1")
        .await
        .unwrap_err()
        .is_not_found());
}

#[tokio::test]
async fn test_pay_installment_materializes_a_completed_expense_dated_today() {
    let fixture = make_fixture();
    fixture.accounts.seed("acc1", "user1");

    let group = fixture
        .service
        .create_group(new_group(3), "user1")
        .await
        .unwrap();
    let second = group.installments[1].clone();

    let paid = fixture
        .service
        .pay_installment(&second.id, "user1")
        .await
        .unwrap();

    assert_eq!(paid.status, InstallmentStatus::Completed);
    assert!(paid.transaction_id.is_some());

    let requests = fixture.transactions.requests.read().unwrap();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.description, "Laptop (2/3)");
    assert_eq!(request.amount, dec!(33.33));
    assert_eq!(request.transaction_type, TransactionType::Expense);
    assert_eq!(request.status, TransactionStatus::Completed);
    assert_eq!(request.category_id.as_deref(), Some("cat1"));
    // Payment is dated "now", not the installment's due date.
    assert_eq!(
        request.transaction_date,
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    );

    let stored = fixture.service.get_group(&group.id, "user1").unwrap();
    assert_eq!(stored.paid_count(), 1);
}

#[tokio::test]
async fn test_pay_installment_twice_is_rejected() {
    let fixture = make_fixture();
    fixture.accounts.seed("acc1", "user1");

    let group = fixture
        .service
        .create_group(new_group(3), "user1")
        .await
        .unwrap();
    let first = group.installments[0].clone();

    fixture
        .service
        .pay_installment(&first.id, "user1")
        .await
        .unwrap();
    let result = fixture.service.pay_installment(&first.id, "user1").await;

    assert!(matches!(
        result,
        Err(Error::Installment(InstallmentError::AlreadyPaid))
    ));
    // No second payment reached the engine.
    assert_eq!(fixture.transactions.requests.read().unwrap().len(), 1);
}

#[tokio::test]
async fn test_pay_cancelled_installment_is_rejected() {
    let fixture = make_fixture();
    fixture.accounts.seed("acc1", "user1");

    let group = fixture
        .service
        .create_group(new_group(3), "user1")
        .await
        .unwrap();
    fixture.service.cancel_group(&group.id, "user1").await.unwrap();

    let result = fixture
        .service
        .pay_installment(&group.installments[0].id, "user1")
        .await;

    assert!(matches!(
        result,
        Err(Error::Installment(InstallmentError::Cancelled))
    ));
}

#[tokio::test]
async fn test_cancel_group_leaves_paid_installments_untouched() {
    let fixture = make_fixture();
    fixture.accounts.seed("acc1", "user1");

    let group = fixture
        .service
        .create_group(new_group(3), "user1")
        .await
        .unwrap();
    fixture
        .service
        .pay_installment(&group.installments[0].id, "user1")
        .await
        .unwrap();

    fixture.service.cancel_group(&group.id, "user1").await.unwrap();

    let stored = fixture.service.get_group(&group.id, "user1").unwrap();
    assert_eq!(stored.installments[0].status, InstallmentStatus::Completed);
    assert_eq!(stored.installments[1].status, InstallmentStatus::Cancelled);
    assert_eq!(stored.installments[2].status, InstallmentStatus::Cancelled);
}

#[tokio::test]
async fn test_cancel_group_is_idempotent() {
    let fixture = make_fixture();
    fixture.accounts.seed("acc1", "user1");

    let group = fixture
        .service
        .create_group(new_group(3), "user1")
        .await
        .unwrap();

    fixture.service.cancel_group(&group.id, "user1").await.unwrap();
    let first_pass = fixture.service.get_group(&group.id, "user1").unwrap();

    fixture.service.cancel_group(&group.id, "user1").await.unwrap();
    let second_pass = fixture.service.get_group(&group.id, "user1").unwrap();

    assert_eq!(first_pass, second_pass);
}

/// Repository whose next settle write fails, for exercising the payment
/// protocol's commit boundary.
#[derive(Default)]
struct FailingSettleRepository {
    inner: MockInstallmentRepository,
    fail_next_settle: AtomicBool,
}

#[async_trait]
impl InstallmentRepositoryTrait for FailingSettleRepository {
    async fn create_group(&self, group: InstallmentGroup) -> Result<InstallmentGroup> {
        self.inner.create_group(group).await
    }

    async fn save_group(&self, group: &InstallmentGroup) -> Result<()> {
        self.inner.save_group(group).await
    }

    async fn delete_group(&self, group_id: &str, user_id: &str) -> Result<usize> {
        self.inner.delete_group(group_id, user_id).await
    }

    fn get_group(&self, group_id: &str, user_id: &str) -> Result<InstallmentGroup> {
        self.inner.get_group(group_id, user_id)
    }

    fn list_groups(&self, user_id: &str) -> Result<Vec<InstallmentGroup>> {
        self.inner.list_groups(user_id)
    }

    fn get_installment(&self, installment_id: &str, user_id: &str) -> Result<Installment> {
        self.inner.get_installment(installment_id, user_id)
    }

    fn save_installment(&self, installment: &Installment) -> Result<()> {
        if self.fail_next_settle.swap(false, Ordering::SeqCst) {
            return Err(DatabaseError::QueryFailed("settle write lost".to_string()).into());
        }
        self.inner.save_installment(installment)
    }
}

/// Executor recording each atomic unit it ran and whether it committed.
#[derive(Default)]
struct TrackingExecutor {
    committed: RwLock<Vec<bool>>,
}

impl TransactionExecutor for TrackingExecutor {
    fn execute<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce() -> Result<T>,
    {
        let result = f();
        self.committed.write().unwrap().push(result.is_ok());
        result
    }
}

#[tokio::test]
async fn test_settle_failure_aborts_the_whole_payment() {
    let accounts = Arc::new(MockAccountRepository::default());
    accounts.seed("acc1", "user1");
    let repository = Arc::new(FailingSettleRepository::default());
    let transactions = Arc::new(MockTransactionService::default());
    let executor = Arc::new(TrackingExecutor::default());
    let service = InstallmentService::new(
        repository.clone(),
        accounts,
        Arc::new(MockCategoryResolver),
        transactions.clone(),
        fixed_clock(),
        executor.clone(),
    );

    let group = service.create_group(new_group(3), "user1").await.unwrap();
    let first = group.installments[0].clone();

    repository.fail_next_settle.store(true, Ordering::SeqCst);
    let result = service.pay_installment(&first.id, "user1").await;
    assert!(matches!(result, Err(Error::Database(_))));

    // The expense creation and the failed settle ran in one atomic unit, so
    // a transactional store rolls the expense back together with it.
    assert_eq!(*executor.committed.read().unwrap(), vec![false]);
    assert_eq!(transactions.requests.read().unwrap().len(), 1);

    // The installment is still payable afterwards.
    let stored = service.get_group(&group.id, "user1").unwrap();
    assert_eq!(stored.installments[0].status, InstallmentStatus::Pending);
    let paid = service.pay_installment(&first.id, "user1").await.unwrap();
    assert_eq!(paid.status, InstallmentStatus::Completed);
    assert_eq!(*executor.committed.read().unwrap(), vec![false, true]);
}

#[tokio::test]
async fn test_delete_group_removes_it() {
    let fixture = make_fixture();
    fixture.accounts.seed("acc1", "user1");

    let group = fixture
        .service
        .create_group(new_group(3), "user1")
        .await
        .unwrap();
    fixture.service.delete_group(&group.id, "user1").await.unwrap();

    assert!(fixture.service.list_groups("user1").unwrap().is_empty());
}
