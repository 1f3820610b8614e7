//! 대전 인덱스 산출 엔진.
//!
//! 동일 관심 인덱스: 기준일 구성 종목 시가총액 합을 100으로 두고,
//! 이후 날짜의 시가총액 합을 같은 비율로 환산합니다.
//!
//! ```text
//! 인덱스(d) = 100 × 시가총액합(d) / 시가총액합(기준일)
//! ```
//!
//! 기준일부터 실행일까지 모든 달력 날짜에 한 행씩 만들며, 휴장일은 값을 비워 두고
//! 데이터가 없는 거래일은 직전 값을 이어 씁니다.

use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info, warn};

use index_core::{
    Basket, BaseState, DailyResult, IndexReport, MarketCap, NoteEntry, PriceRecord, Ticker,
    UnlistedPolicy,
};
use index_data::HolidayCalendar;

use crate::error::{EngineError, Result};

/// 하루치 바스켓 집계.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DaySnapshot {
    /// 그날 데이터가 있는 종목들의 시가총액 합
    pub aggregate_market_cap: MarketCap,
    /// 그날 데이터가 있는 종목
    pub tickers: BTreeSet<Ticker>,
}

/// 레코드를 날짜별로 집계합니다.
pub fn group_by_date<'a, I>(records: I) -> BTreeMap<NaiveDate, DaySnapshot>
where
    I: IntoIterator<Item = &'a PriceRecord>,
{
    let mut days: BTreeMap<NaiveDate, DaySnapshot> = BTreeMap::new();
    for record in records {
        let day = days.entry(record.date).or_default();
        day.aggregate_market_cap += record.market_cap;
        day.tickers.insert(record.ticker.clone());
    }
    days
}

/// 종목별 첫 등장일.
pub fn first_appearance(days: &BTreeMap<NaiveDate, DaySnapshot>) -> BTreeMap<Ticker, NaiveDate> {
    let mut first = BTreeMap::new();
    for (date, day) in days {
        for ticker in &day.tickers {
            first.entry(ticker.clone()).or_insert(*date);
        }
    }
    first
}

/// 가장 이른 데이터 날짜를 기준일로 하는 기준 상태.
pub fn compute_base(days: &BTreeMap<NaiveDate, DaySnapshot>) -> Option<BaseState> {
    days.iter()
        .next()
        .map(|(date, day)| BaseState::new(*date, day.aggregate_market_cap))
}

/// [`step`]이 참조하는 실행 단위 상태. 산출 중에는 바뀌지 않습니다.
pub struct WalkContext<'a, C: ?Sized> {
    pub base: &'a BaseState,
    pub first_appearance: &'a BTreeMap<Ticker, NaiveDate>,
    pub unlisted: &'a [Ticker],
    pub unlisted_policy: UnlistedPolicy,
    pub calendar: &'a C,
}

/// 하루치 결과를 계산합니다.
///
/// `prior`는 같은 실행에서 앞서 계산된 결과(날짜 오름차순)입니다.
/// 시가총액 합은 여기서 이어 쓰지 않으며 [`forward_fill`]에서 채웁니다.
pub fn step<C>(
    ctx: &WalkContext<'_, C>,
    prior: &[DailyResult],
    date: NaiveDate,
    day: Option<&DaySnapshot>,
) -> DailyResult
where
    C: HolidayCalendar + ?Sized,
{
    let mut result = DailyResult::empty(date);

    if ctx.calendar.is_holiday(date) {
        let note = match day {
            Some(snapshot) if !snapshot.tickers.is_empty() => {
                NoteEntry::HolidayData(snapshot.tickers.iter().cloned().collect())
            }
            _ => NoteEntry::Holiday,
        };
        result.notes.push(note);
        return result;
    }

    match day {
        Some(snapshot) => {
            result.aggregate_market_cap = Some(snapshot.aggregate_market_cap);
            result.index_value = ctx.base.index_for(snapshot.aggregate_market_cap);
            if result.index_value.is_none() {
                warn!(
                    date = %date,
                    aggregate_market_cap = %snapshot.aggregate_market_cap,
                    "인덱스 값이 표현 범위를 넘었습니다"
                );
                result.notes.push(NoteEntry::IndexOverflow);
            }
        }
        None if prior.is_empty() => {
            result.index_value = Some(ctx.base.base_index_value);
        }
        None => {
            result.index_value = prior.iter().rev().find_map(|r| r.index_value);
        }
    }

    for (ticker, first) in ctx.first_appearance {
        let present = day.is_some_and(|s| s.tickers.contains(ticker));
        if *first <= date && !present {
            result.notes.push(NoteEntry::Missing(ticker.clone()));
        }
    }

    if ctx.unlisted_policy == UnlistedPolicy::Flag {
        result
            .notes
            .extend(ctx.unlisted.iter().cloned().map(NoteEntry::Unlisted));
    }

    result
}

/// 인덱스 값과 시가총액 합의 빈 칸을 직전 값으로 채웁니다.
///
/// 첫 값이 나오기 전의 빈 칸은 그대로 둡니다. 이미 채워진 결과에 다시 적용해도 같습니다.
pub fn forward_fill(mut rows: Vec<DailyResult>) -> Vec<DailyResult> {
    let mut last_index = None;
    let mut last_cap = None;
    for row in rows.iter_mut() {
        match row.index_value {
            Some(v) => last_index = Some(v),
            None => row.index_value = last_index,
        }
        match row.aggregate_market_cap {
            Some(v) => last_cap = Some(v),
            None => row.aggregate_market_cap = last_cap,
        }
    }
    rows
}

/// 산출 진행 상황 수신자.
pub trait ProgressObserver {
    /// 산출할 날짜 수
    fn on_start(&mut self, _total_days: u64) {}
    /// 하루 산출 완료
    fn on_day(&mut self, _date: NaiveDate) {}
    fn on_finish(&mut self) {}
}

impl ProgressObserver for () {}

/// 대전 인덱스 엔진.
#[derive(Debug, Clone)]
pub struct IndexEngine<C> {
    basket: Basket,
    calendar: C,
    unlisted_policy: UnlistedPolicy,
    analysis_start: Option<NaiveDate>,
}

impl<C: HolidayCalendar> IndexEngine<C> {
    pub fn new(basket: Basket, calendar: C) -> Self {
        Self {
            basket,
            calendar,
            unlisted_policy: UnlistedPolicy::default(),
            analysis_start: None,
        }
    }

    pub fn with_unlisted_policy(mut self, policy: UnlistedPolicy) -> Self {
        self.unlisted_policy = policy;
        self
    }

    /// 분석 시작일. 이전 날짜의 레코드는 버립니다.
    pub fn with_analysis_start(mut self, start: Option<NaiveDate>) -> Self {
        self.analysis_start = start;
        self
    }

    /// 인덱스를 산출합니다.
    pub fn run(&self, records: &[PriceRecord], run_date: NaiveDate) -> Result<IndexReport> {
        self.run_with_observer(records, run_date, &mut ())
    }

    /// 진행 상황을 `observer`에 알리며 인덱스를 산출합니다.
    pub fn run_with_observer(
        &self,
        records: &[PriceRecord],
        run_date: NaiveDate,
        observer: &mut dyn ProgressObserver,
    ) -> Result<IndexReport> {
        let report = self.walk(records, run_date, observer)?;
        Ok(IndexReport {
            rows: forward_fill(report.rows),
            ..report
        })
    }

    /// 마지막 채우기 단계 전의 산출 결과.
    ///
    /// 휴장일 행은 여기서 항상 값이 비어 있습니다.
    pub fn walk(
        &self,
        records: &[PriceRecord],
        run_date: NaiveDate,
        observer: &mut dyn ProgressObserver,
    ) -> Result<IndexReport> {
        let in_basket: Vec<&PriceRecord> = records
            .iter()
            .filter(|r| self.basket.contains(&r.ticker))
            .filter(|r| self.analysis_start.map_or(true, |start| r.date >= start))
            .collect();

        let ignored = records.len() - in_basket.len();
        if ignored > 0 {
            debug!(ignored, "바스켓 외 종목 또는 분석 기간 이전 레코드 제외");
        }

        let earliest = in_basket
            .iter()
            .map(|r| r.date)
            .min()
            .ok_or(EngineError::NoData)?;
        if run_date < earliest {
            return Err(EngineError::InvalidRange {
                base_date: earliest,
                run_date,
            });
        }

        let days = group_by_date(in_basket.into_iter().filter(|r| r.date <= run_date));
        let base = compute_base(&days).ok_or(EngineError::NoData)?;
        let first = first_appearance(&days);

        let unlisted: Vec<Ticker> = self
            .basket
            .iter()
            .filter(|t| !first.contains_key(*t))
            .cloned()
            .collect();
        for ticker in &unlisted {
            warn!(ticker = %ticker, "분석 기간 내 데이터가 없는 구성 종목");
        }

        info!(
            base_date = %base.base_date,
            base_market_cap = %base.base_market_cap,
            base_index = %base.base_index_value,
            "기준 상태 산출"
        );

        let ctx = WalkContext {
            base: &base,
            first_appearance: &first,
            unlisted: &unlisted,
            unlisted_policy: self.unlisted_policy,
            calendar: &self.calendar,
        };

        let total_days = (run_date - base.base_date).num_days() + 1;
        observer.on_start(total_days as u64);

        let mut rows: Vec<DailyResult> = Vec::with_capacity(total_days as usize);
        for date in base.base_date.iter_days().take_while(|d| *d <= run_date) {
            let row = step(&ctx, &rows, date, days.get(&date));
            rows.push(row);
            observer.on_day(date);
        }
        observer.on_finish();

        let holidays = rows.iter().filter(|r| r.is_holiday()).count();
        info!(
            days = rows.len(),
            holidays,
            unlisted = unlisted.len(),
            "인덱스 산출 완료"
        );

        Ok(IndexReport {
            base,
            rows,
            unlisted,
        })
    }
}
