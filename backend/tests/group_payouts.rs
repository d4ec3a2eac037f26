use chrono::{TimeZone, Utc};
use shared::{
    Cents, Contribution, ContributionStatus, CurrencyCode, Expense, GroupMember, MemberId, Revenue,
    VentureGroup,
};
use venture_tracker::{
    format_money_from_cents, parse_money_input_to_cents, GroupFinanceService, OwnershipService,
    PayoutService,
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn paid(id: &str, member: &str, input: &str) -> Contribution {
    Contribution {
        id: id.to_string(),
        member: MemberId::from(member),
        group_id: "group::sorghum".to_string(),
        amount: parse_money_input_to_cents(input).unwrap(),
        status: ContributionStatus::Paid,
        date_paid: Some(Utc.with_ymd_and_hms(2025, 2, 1, 8, 0, 0).unwrap()),
    }
}

fn members() -> Vec<GroupMember> {
    vec![
        GroupMember {
            member: MemberId::from("amara"),
            display_name: "Amara".to_string(),
        },
        GroupMember {
            member: MemberId::from("jonas"),
            display_name: "Jonas".to_string(),
        },
        GroupMember {
            member: MemberId::from("wanjiru"),
            display_name: "Wanjiru".to_string(),
        },
    ]
}

#[test]
fn test_season_from_form_input_to_payouts() {
    init_logging();
    let eur = CurrencyCode::parse("eur").unwrap();
    let group = VentureGroup {
        id: "group::sorghum".to_string(),
        name: "Sorghum season".to_string(),
        currency: eur.clone(),
        target_amount: parse_money_input_to_cents("1500").unwrap(),
        monthly_contribution_amount: parse_money_input_to_cents("50").unwrap(),
    };

    let contributions = vec![
        paid("c1", "amara", "500.00"),
        paid("c2", "jonas", "250"),
        paid("c3", "wanjiru", "250.00"),
        paid("c4", "amara", "0.01"),
    ];
    let expenses = vec![Expense {
        id: "e1".to_string(),
        group_id: group.id.clone(),
        description: "Seed and fertiliser".to_string(),
        category: "Inputs".to_string(),
        amount: parse_money_input_to_cents("400.005").unwrap(),
        date_spent: Utc.with_ymd_and_hms(2025, 3, 1, 8, 0, 0).unwrap(),
    }];
    let revenues = vec![Revenue {
        id: "r1".to_string(),
        group_id: group.id.clone(),
        source: "Cooperative buyer".to_string(),
        description: "Harvest sale".to_string(),
        amount: parse_money_input_to_cents("1200").unwrap(),
        date: Utc.with_ymd_and_hms(2025, 8, 15, 8, 0, 0).unwrap(),
    }];

    let finance = GroupFinanceService::new();
    let summary = finance.financial_summary(&eur, &contributions, &expenses, &revenues);
    assert_eq!(summary.total_raised, Cents(100_001));
    assert_eq!(summary.total_spent, Cents(40_001));
    assert_eq!(format_money_from_cents(summary.net_profit, &summary.currency), "EUR 799.99");

    let progress = finance.group_progress(&group, members().len(), &contributions, &expenses, &revenues);
    assert_eq!(progress.progress_percentage, 67);

    let ownership = OwnershipService::new().calculate_ownership(&contributions);
    let percentages: Vec<u8> = ownership.iter().map(|o| o.ownership_percentage).collect();
    assert_eq!(percentages, vec![50, 25, 25]);

    let payouts_service = PayoutService::new();
    let available = finance.available_for_payout(&summary);
    let suggestions = payouts_service.calculate_payouts(&ownership, &members(), available, &[]);

    assert_eq!(payouts_service.total_payout_amount(&suggestions), available);
    assert_eq!(suggestions[0].member_name, "Amara");
    assert!(suggestions.iter().all(|s| !s.is_paid));

    let recorded = payouts_service
        .record_payout(&group.id, suggestions[1].member.clone(), suggestions[1].payout_amount)
        .unwrap();
    let refreshed = payouts_service.calculate_payouts(&ownership, &members(), available, &[recorded]);
    assert!(!refreshed[0].is_paid);
    assert!(refreshed[1].is_paid);
    assert!(!refreshed[2].is_paid);
}

#[test]
fn test_payout_suggestion_wire_shape() {
    init_logging();
    let ownership = OwnershipService::new().calculate_ownership(&[paid("c1", "amara", "10")]);
    let suggestions = PayoutService::new().calculate_payouts(&ownership, &members(), Cents(2_550), &[]);

    let json = serde_json::to_value(&suggestions[0]).unwrap();

    assert_eq!(json["member"], "amara");
    assert_eq!(json["member_name"], "Amara");
    assert_eq!(json["ownership_percentage"], 100);
    assert_eq!(json["payout_amount"], 2550);
    assert_eq!(json["is_paid"], false);
}
