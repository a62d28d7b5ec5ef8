use budget_repo::transaction_repo::NewTransaction;
use chrono::{DateTime, TimeZone, Utc};
use fake::Fake;
use rand::seq::SliceRandom;

trait Generator<T> {
    fn gen(&mut self) -> T;
}

struct Predefined<T> {
    values: Vec<T>,
    current_pos: usize,
}

impl<T> Predefined<T> {
    fn boxed(values: Vec<T>) -> Box<Predefined<T>> {
        Box::new(Predefined {
            values,
            current_pos: 0,
        })
    }
}

impl<T: Clone> Generator<T> for Predefined<T> {
    fn gen(&mut self) -> T {
        let v = self.values[self.current_pos].clone();
        self.current_pos += 1;
        v
    }
}

struct RandomSample<T> {
    values: Vec<T>,
}

impl<T> RandomSample<T> {
    fn boxed(values: Vec<T>) -> Box<RandomSample<T>> {
        Box::new(RandomSample { values })
    }
}

impl<T: Clone> Generator<T> for RandomSample<T> {
    fn gen(&mut self) -> T {
        self.values.choose(&mut rand::thread_rng()).unwrap().clone()
    }
}

/// Whole cents between -10 000.00 and 10 000.00.
struct FakeAmount;

impl Generator<i64> for FakeAmount {
    fn gen(&mut self) -> i64 {
        (-1_000_000i64..1_000_000).fake()
    }
}

/// Whole seconds, so the value survives any store's timestamp precision.
struct FakeDate;

impl Generator<DateTime<Utc>> for FakeDate {
    fn gen(&mut self) -> DateTime<Utc> {
        let seconds: i64 = (0i64..2_000_000_000).fake();
        Utc.timestamp_opt(seconds, 0).unwrap()
    }
}

#[allow(dead_code)]
pub struct NewTransactionGenerator {
    amnt_gen: Box<dyn Generator<i64>>,
    date_gen: Box<dyn Generator<DateTime<Utc>>>,
    place_gen: Box<dyn Generator<i32>>,
}

#[allow(dead_code)]
impl NewTransactionGenerator {
    pub fn for_places(place_ids: Vec<i32>) -> NewTransactionGenerator {
        NewTransactionGenerator {
            amnt_gen: Box::new(FakeAmount),
            date_gen: Box::new(FakeDate),
            place_gen: RandomSample::boxed(place_ids),
        }
    }

    pub fn with_amounts(mut self, amounts: Vec<i64>) -> NewTransactionGenerator {
        self.amnt_gen = Predefined::boxed(amounts);
        self
    }

    pub fn with_dates(mut self, dates: Vec<DateTime<Utc>>) -> NewTransactionGenerator {
        self.date_gen = Predefined::boxed(dates);
        self
    }

    pub fn generate(&mut self) -> NewTransaction {
        NewTransaction::new(
            self.amnt_gen.gen(),
            self.date_gen.gen(),
            self.place_gen.gen(),
        )
    }

    pub fn generate_many(&mut self, count: usize) -> Vec<NewTransaction> {
        let mut vec = Vec::with_capacity(count);
        for _ in 0..count {
            vec.push(self.generate())
        }
        vec
    }
}
