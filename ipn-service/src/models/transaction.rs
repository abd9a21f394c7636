literal_set! {
    open
    /// Kind of transaction an IPN message was sent for.
    pub enum TransactionType {
        Adjustment => "adjustment",
        Cart => "cart",
        ExpressCheckout => "express_checkout",
        MassPay => "masspay",
        MerchantPayment => "merch_pmt",
        BillingAgreementCancel => "mp_cancel",
        NewCase => "new_case",
        Payout => "payout",
        ProHosted => "pro_hosted",
        RecurringPayment => "recurring_payment",
        RecurringPaymentExpired => "recurring_payment_expired",
        RecurringPaymentFailed => "recurring_payment_failed",
        RecurringPaymentProfileCancel => "recurring_payment_profile_cancel",
        RecurringPaymentProfileCreated => "recurring_payment_profile_created",
        RecurringPaymentSkipped => "recurring_payment_skipped",
        RecurringPaymentSuspended => "recurring_payment_suspended",
        RecurringPaymentSuspendedMaxFailed => "recurring_payment_suspended_due_to_max_failed_payment",
        SendMoney => "send_money",
        SubscriptionCancel => "subscr_cancel",
        SubscriptionEndOfTerm => "subscr_eot",
        SubscriptionFailed => "subscr_failed",
        SubscriptionModify => "subscr_modify",
        SubscriptionPayment => "subscr_payment",
        SubscriptionSignup => "subscr_signup",
        VirtualTerminal => "virtual_terminal",
        WebAccept => "web_accept",
    }
}

impl TransactionType {
    /// Subscription, recurring profile and billing agreement kinds.
    pub fn is_recurring(&self) -> bool {
        matches!(
            self,
            TransactionType::MerchantPayment
                | TransactionType::BillingAgreementCancel
                | TransactionType::RecurringPayment
                | TransactionType::RecurringPaymentExpired
                | TransactionType::RecurringPaymentFailed
                | TransactionType::RecurringPaymentProfileCancel
                | TransactionType::RecurringPaymentProfileCreated
                | TransactionType::RecurringPaymentSkipped
                | TransactionType::RecurringPaymentSuspended
                | TransactionType::RecurringPaymentSuspendedMaxFailed
                | TransactionType::SubscriptionCancel
                | TransactionType::SubscriptionEndOfTerm
                | TransactionType::SubscriptionFailed
                | TransactionType::SubscriptionModify
                | TransactionType::SubscriptionPayment
                | TransactionType::SubscriptionSignup
        )
    }
}
